//! Tolerance-based comparison of MusicBox result tables.
//!
//! A results file is a header line followed by rows of space-delimited numbers:
//!
//! ```text
//! time CONC.O3 CONC.O2
//! 0.0 1.0e-8 0.21
//! 60.0 1.1e-8 0.21
//! ```
//!
//! Two files are compared in lockstep:
//!
//! 1. The header line must be byte-identical. Its field count fixes the number of
//!    values read per row.
//! 2. Every value pair must agree within a [`Tolerance`], and the delimiter byte
//!    following each value must be the same in both files.
//! 3. Both files must run out of rows at the same time.
//!
//! The first violation aborts the comparison.
//!
//! # Example
//!
//! ```
//! use mbtest_core::compare::{compare_readers, Tolerance};
//!
//! let expected = "time O3\n0.0 1.0\n1.0 2.0\n";
//! let actual = "time O3\n0.0 1.0\n1.0 2.001\n";
//! let tolerance = Tolerance::new(0.01, 1e-6).unwrap();
//!
//! let summary = compare_readers(expected.as_bytes(), actual.as_bytes(), tolerance).unwrap();
//! assert_eq!(summary.columns, 2);
//! assert_eq!(summary.rows, 2);
//! ```

mod stream;
mod tolerance;

pub use stream::{Field, TableStream};
pub use tolerance::Tolerance;

use crate::errors::{CompareError, CompareResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, trace};

/// Statistics gathered from a successful comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonSummary {
    /// Number of fields on the header line
    pub columns: usize,
    /// Number of data rows compared (excluding the header)
    pub rows: usize,
    /// Number of value pairs compared
    pub values: usize,
    /// Largest `|a - b|` seen
    pub max_absolute_difference: f64,
    /// Largest finite mean-based relative difference seen
    pub max_relative_difference: f64,
}

impl ComparisonSummary {
    fn record(&mut self, a: f64, b: f64) {
        self.values += 1;
        let absolute = (a - b).abs();
        if absolute > self.max_absolute_difference {
            self.max_absolute_difference = absolute;
        }
        let relative = Tolerance::relative_difference(a, b);
        if relative.is_finite() && relative > self.max_relative_difference {
            self.max_relative_difference = relative;
        }
    }
}

/// Discover the column count by scanning the header lines of both streams in lockstep.
///
/// The count starts at one and every run of spaces adds another column. Scanning
/// stops at the first newline. A byte mismatch directly after a space is reported
/// as [`CompareError::DelimiterMismatch`], any other mismatch as
/// [`CompareError::HeaderMismatch`]. Running out of input on either stream before
/// the newline is an error, not an empty table.
pub fn scan_header<A: BufRead, B: BufRead>(
    left: &mut TableStream<A>,
    right: &mut TableStream<B>,
) -> CompareResult<usize> {
    let mut columns = 1;
    let mut in_delimiter = false;
    loop {
        let offset = left.position();
        let l = left
            .next_byte()?
            .ok_or(CompareError::UnterminatedHeader { file: 1 })?;
        let r = right
            .next_byte()?
            .ok_or(CompareError::UnterminatedHeader { file: 2 })?;

        if l != r {
            return Err(if in_delimiter {
                CompareError::DelimiterMismatch {
                    offset,
                    left: l,
                    right: r,
                }
            } else {
                CompareError::HeaderMismatch {
                    offset,
                    left: l,
                    right: r,
                }
            });
        }

        match l {
            b'\n' => return Ok(columns),
            b' ' if !in_delimiter => {
                columns += 1;
                in_delimiter = true;
            }
            b' ' => {}
            _ => in_delimiter = false,
        }
    }
}

/// Read one value from `stream`, mapping end of input and bad tokens to errors.
fn read_value<R: BufRead>(
    stream: &mut TableStream<R>,
    file: usize,
    row: usize,
    column: usize,
) -> CompareResult<f64> {
    let field = stream
        .next_field()?
        .ok_or(CompareError::TruncatedRow { file, row, column })?;
    field.parse().ok_or(CompareError::MalformedValue {
        file,
        offset: field.offset,
        token: field.text,
    })
}

/// Compare two result tables read from arbitrary buffered readers.
///
/// See the [module documentation](self) for the rules applied.
pub fn compare_readers<A: BufRead, B: BufRead>(
    left: A,
    right: B,
    tolerance: Tolerance,
) -> CompareResult<ComparisonSummary> {
    let mut left = TableStream::new(left);
    let mut right = TableStream::new(right);

    let columns = scan_header(&mut left, &mut right)?;
    debug!(columns, "Header lines match");

    let mut summary = ComparisonSummary {
        columns,
        ..Default::default()
    };

    loop {
        left.skip_whitespace()?;
        right.skip_whitespace()?;
        match (left.is_eof()?, right.is_eof()?) {
            (true, true) => break,
            (false, false) => {}
            _ => {
                return Err(CompareError::RowCountMismatch {
                    row: summary.rows + 1,
                })
            }
        }

        let row = summary.rows + 1;
        for column in 1..=columns {
            let a = read_value(&mut left, 1, row, column)?;
            let b = read_value(&mut right, 2, row, column)?;
            if !tolerance.accepts(a, b) {
                return Err(CompareError::DataMismatch {
                    row,
                    column,
                    left: a,
                    right: b,
                });
            }
            summary.record(a, b);

            // Each value is followed by exactly one delimiter byte. Only a
            // whitespace delimiter may face end of file on the other side.
            match (left.next_byte()?, right.next_byte()?) {
                (Some(l), Some(r)) if l != r => {
                    return Err(CompareError::SeparatorMismatch {
                        row,
                        column,
                        left: l,
                        right: r,
                    });
                }
                (Some(byte), None) if !byte.is_ascii_whitespace() => {
                    return Err(CompareError::UnmatchedSeparator {
                        file: 1,
                        row,
                        column,
                        byte,
                    });
                }
                (None, Some(byte)) if !byte.is_ascii_whitespace() => {
                    return Err(CompareError::UnmatchedSeparator {
                        file: 2,
                        row,
                        column,
                        byte,
                    });
                }
                _ => {}
            }
        }
        trace!(row, "Row matches");
        summary.rows = row;
    }

    debug!(
        rows = summary.rows,
        values = summary.values,
        "Reached the end of both tables"
    );
    Ok(summary)
}

/// Compare the result tables stored at two paths.
pub fn compare_files(
    left: impl AsRef<Path>,
    right: impl AsRef<Path>,
    tolerance: Tolerance,
) -> CompareResult<ComparisonSummary> {
    let left = open(left.as_ref())?;
    let right = open(right.as_ref())?;
    compare_readers(left, right, tolerance)
}

fn open(path: &Path) -> CompareResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| CompareError::Open {
            path: path.to_path_buf(),
            source,
        })
}
