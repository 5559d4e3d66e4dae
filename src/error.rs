//! Fatal load and snapshot errors.

use thiserror::Error;

/// Errors that stop a daily stock file from loading.
///
/// Field-level parse failures are not errors; they go to a
/// [`DiagnosticSink`](crate::diagnostics::DiagnosticSink).
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("Cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error while scanning a directory
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid CSV (broken quoting, unreadable bytes)
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// The file has no header row.
    #[error("Missing header row")]
    MissingHeader,

    /// The header row does not have the fixed number of fields.
    #[error("Header has {found} fields, expected {expected}")]
    HeaderWidth { expected: usize, found: usize },

    /// A data row does not have the fixed number of fields.
    ///
    /// `row` is the 0-based data row index, header excluded, as in
    /// [`FieldDiagnostic`](crate::diagnostics::FieldDiagnostic).
    #[error("Data row {row} has {found} fields, expected {expected}")]
    FieldCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The compound code has no separator to split the stock code from.
    #[error("Malformed stock code: {0:?}")]
    MalformedCode(String),
}

/// Errors while writing or reading a table snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding failed.
    #[error("Snapshot encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    /// The stock code cannot be used as a file name inside the output directory.
    #[error("Stock code {0:?} is not a plain file name")]
    InvalidName(String),

    /// The decoded table has columns of different lengths.
    #[error("Snapshot {0} has misaligned columns")]
    Misaligned(String),
}
