use tracing_subscriber::EnvFilter;

/// Initialize tracing from the `-v` count; `RUST_LOG` wins if set.
///
/// Output goes to stderr, stdout is reserved for the generated table.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let default_filter = format!("sunrise_sunset_lut={level}");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
