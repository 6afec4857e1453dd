use std::path::PathBuf;

use thiserror::Error;

/// Every failure the comparison pipeline can report.
///
/// Nothing is recovered internally: each variant travels up to `main`,
/// which prints the chain and exits non-zero.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}:{line}: field {field} is not a number: '{text}'", .path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        field: usize,
        text: String,
    },

    #[error("line {line}: expected {expected} columns, found {actual}")]
    Schema {
        line: u64,
        expected: usize,
        actual: usize,
    },

    #[error("column {index} for '{role}' is out of range (rows have {width} columns)")]
    ColumnIndex {
        role: String,
        index: usize,
        width: usize,
    },

    #[error("{what}: expected {expected}, found {actual}")]
    DimensionMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    #[error("no samples to plot")]
    EmptySeries,

    #[error("x is not strictly monotonic at sample {index}")]
    UnorderedAxis { index: usize },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("chart export failed: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, CompareError>;
