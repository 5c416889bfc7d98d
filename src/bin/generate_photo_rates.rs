//! Generate the photolysis-rate NetCDF input used by the parking lot use case.
//!
//! # Usage
//!
//! ```bash
//! # Canonical fixture, written to ./parking_lot_photo_rates.nc
//! generate_photo_rates
//!
//! # Custom schedule read from a TOML file, checked after writing
//! generate_photo_rates --config photo_rates.toml --output rates.nc --verify
//! ```

use clap::Parser;
use mbtest_core::errors::FixtureResult;
use mbtest_core::fixture::{verify_photo_rates, write_photo_rates, WriteSummary};
use mbtest_core::parameters::PhotoRateParameters;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Writes a synthetic year of hourly photolysis rates to a NetCDF file
#[derive(Parser, Debug)]
#[command(name = "generate_photo_rates")]
struct Args {
    /// TOML file overriding the default parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file, takes precedence over the configured one
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Read the file back after writing and check its record count
    #[arg(long)]
    verify: bool,
}

fn run(args: Args) -> FixtureResult<WriteSummary> {
    let mut parameters = match &args.config {
        Some(path) => PhotoRateParameters::from_toml_file(path)?,
        None => PhotoRateParameters::default(),
    };
    if let Some(output) = args.output {
        parameters.output = output;
    }

    let summary = write_photo_rates(&parameters)?;
    if args.verify {
        let table = verify_photo_rates(&summary)?;
        info!(records = table.len(), "Verified fixture");
    }
    Ok(summary)
}

fn main() -> ExitCode {
    mbtest::init_logging();
    let args = Args::parse();

    match run(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
