mod cli;
mod logging;

use std::fs;
use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use tracing::info;

use sunrise_sunset_lut::{generate_table, render_table, GeoCoordinate, PhaseScanResolver};

use crate::cli::Cli;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => e.exit(),
            _ => {
                e.print().ok();
                process::exit(1);
            }
        },
    };
    logging::init(cli.verbose);

    let coordinate = match cli::validate(cli.latitude.as_deref(), cli.longitude.as_deref()) {
        Ok(coordinate) => coordinate,
        Err(e) => {
            println!("{e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(&cli, coordinate) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli, coordinate: GeoCoordinate) -> Result<()> {
    let config = cli.table_config(coordinate);
    let resolver = PhaseScanResolver::default();
    let table = generate_table(&config, &resolver)
        .context("sunrise/sunset table generation failed")?;
    let source = render_table(&table);

    match &cli.output {
        Some(path) => {
            fs::write(path, &source)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "table written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(source.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write table to stdout")?;
        }
    }
    Ok(())
}
