//! Compare two MusicBox result files within a tolerance.
//!
//! # Usage
//!
//! ```bash
//! compare_results expected.csv actual.csv 1.0e-4 1.0e-12
//! ```
//!
//! Exits with status 0 if the files match. Any difference is reported on
//! stdout and the process exits with a non-zero status.

use clap::Parser;
use mbtest_core::compare::{compare_files, ComparisonSummary, Tolerance};
use mbtest_core::errors::CompareResult;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Compares MusicBox results for equality with the provided tolerances
#[derive(Parser, Debug)]
#[command(name = "compare_results")]
struct Args {
    /// First results file
    results_file_1: PathBuf,

    /// Second results file
    results_file_2: PathBuf,

    /// Largest allowed relative difference, 2|a-b|/|a+b|
    #[arg(allow_negative_numbers = true)]
    relative_tolerance: f64,

    /// Largest allowed absolute difference, |a-b|
    #[arg(allow_negative_numbers = true)]
    absolute_tolerance: f64,
}

fn run(args: &Args) -> CompareResult<(Tolerance, ComparisonSummary)> {
    let tolerance = Tolerance::new(args.relative_tolerance, args.absolute_tolerance)?;
    let summary = compare_files(&args.results_file_1, &args.results_file_2, tolerance)?;
    Ok((tolerance, summary))
}

fn main() -> ExitCode {
    mbtest::init_logging();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            println!("\n{e}");
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&args) {
        Ok((tolerance, summary)) => {
            info!(
                relative_tolerance = tolerance.relative(),
                absolute_tolerance = tolerance.absolute(),
                columns = summary.columns,
                rows = summary.rows,
                values = summary.values,
                max_absolute_difference = summary.max_absolute_difference,
                max_relative_difference = summary.max_relative_difference,
                "Results match"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("\n\n{e}\n");
            ExitCode::FAILURE
        }
    }
}
