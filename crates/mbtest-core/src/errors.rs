use std::path::PathBuf;
use thiserror::Error;

/// Failure raised while comparing two result tables.
///
/// Every variant is fatal: the comparator is a pass/fail oracle and stops at the
/// first discrepancy. Header failures keep the historical `ERROR 1`/`ERROR 2`/`ERROR 3`
/// tags because test logs are grepped for them.
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("ERROR 1: header mismatch at byte {offset} ('{}' vs '{}')", .left.escape_ascii(), .right.escape_ascii())]
    HeaderMismatch { offset: u64, left: u8, right: u8 },
    #[error("ERROR 2: header delimiter mismatch at byte {offset} ('{}' vs '{}')", .left.escape_ascii(), .right.escape_ascii())]
    DelimiterMismatch { offset: u64, left: u8, right: u8 },
    #[error("ERROR 3: files have a different number of rows (first difference at data row {row})")]
    RowCountMismatch { row: usize },
    #[error("data mismatch {left} {right} (data row {row}, column {column})")]
    DataMismatch {
        row: usize,
        column: usize,
        left: f64,
        right: f64,
    },
    #[error("structural mismatch after data row {row}, column {column} ('{}' vs '{}')", .left.escape_ascii(), .right.escape_ascii())]
    SeparatorMismatch {
        row: usize,
        column: usize,
        left: u8,
        right: u8,
    },
    #[error("structural mismatch after data row {row}, column {column}: file {file} has '{}' where the other file ends", .byte.escape_ascii())]
    UnmatchedSeparator {
        file: usize,
        row: usize,
        column: usize,
        byte: u8,
    },
    #[error("end of file in file {file} before the end of the header line")]
    UnterminatedHeader { file: usize },
    #[error("file {file} ends in the middle of data row {row} (column {column})")]
    TruncatedRow {
        file: usize,
        row: usize,
        column: usize,
    },
    #[error("malformed value {token:?} in file {file} at byte {offset}")]
    MalformedValue {
        file: usize,
        offset: u64,
        token: String,
    },
    #[error("invalid {name} tolerance {value}: must be a non-negative number")]
    InvalidTolerance { name: &'static str, value: f64 },
    #[error("Cannot open file '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("read failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure raised while generating or reading back the photolysis-rate fixture.
#[derive(Error, Debug)]
pub enum FixtureError {
    /// A call into the NetCDF library failed.
    ///
    /// `file` and `line` point at the call site inside this crate.
    #[error("line {line} of {file}: {operation}: {source}")]
    Netcdf {
        operation: String,
        file: &'static str,
        line: u32,
        source: netcdf::Error,
    },
    #[error("variable '{0}' not found")]
    MissingVariable(String),
    #[error("dimension '{0}' not found")]
    MissingDimension(String),
    #[error("dimension '{0}' is not unlimited")]
    LimitedDimension(String),
    #[error("attribute 'units' of variable '{0}' is missing or not text")]
    MissingUnits(String),
    #[error("'{path}' holds {found} records, expected {expected}")]
    RecordCount {
        path: String,
        expected: usize,
        found: usize,
    },
    #[error("active window ends ({stop} h) before it starts ({start} h)")]
    InvalidWindow { start: f64, stop: f64 },
    #[error("could not read parameters from '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse parameters from '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Convenience type for `Result<T, CompareError>`.
pub type CompareResult<T> = Result<T, CompareError>;

/// Convenience type for `Result<T, FixtureError>`.
pub type FixtureResult<T> = Result<T, FixtureError>;
