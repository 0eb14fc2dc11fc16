use std::io;
use thiserror::Error;

/// Error type for pipeline operations.
///
/// Only structural failures surface here: a source that cannot be
/// recognized, fetched or parsed into a table at all. Content-level
/// anomalies (unparseable cells, no temporal column, no chart
/// suggestions) are absorbed into the data model instead.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Unrecognized file extension. Raised before any parsing is attempted.
    #[error("Unsupported file type: {0} (use .csv or .xlsx)")]
    UnsupportedFormat(String),

    /// Remote fetch failed (network error, timeout or non-2xx status).
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Excel workbook error.
    #[error("Excel parsing error: {0}")]
    Excel(#[from] calamine::XlsxError),

    /// Empty source or no data.
    #[error("Empty source or no data to analyze")]
    EmptyData,
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
