//! Error types for the menucheck analyzer.
//!
//! The core (parser, menu decoder, validator, aggregator, query engine)
//! degrades silently on irregular data and never returns these. They are
//! raised by the surfaces around it:
//!
//! - [`CsvError`] - Reading and decoding input
//! - [`QueryError`] - Strict column checking
//! - [`ExportError`] - CSV export
//! - [`PipelineError`] - Top-level orchestration errors
//! - [`ServerError`] - HTTP surface
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Input Errors
// =============================================================================

/// Errors while reading or decoding CSV input.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Nothing left after trimming.
    #[error("CSV input is empty")]
    EmptyFile,
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors raised for strict column checking and unparsable query options.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A required column is entirely absent from the header.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Mode name not recognized.
    #[error("Unknown mode '{0}' (expected 'names' or 'combos')")]
    UnknownMode(String),
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while rendering output rows as CSV text.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV writer error.
    #[error("CSV writer error: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the writer failed.
    #[error("Export IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Writer produced bytes that are not UTF-8.
    #[error("Export produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level analysis errors.
///
/// This is the main error type returned by [`crate::query::pipeline::analyze_file`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Strict column check failed.
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Export error.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Socket or runtime failure.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV input operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for strict query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // CsvError -> PipelineError
        let csv_err = CsvError::EmptyFile;
        let pipeline_err: PipelineError = csv_err.into();
        assert!(pipeline_err.to_string().contains("empty"));

        // QueryError -> PipelineError -> ServerError
        let query_err = QueryError::MissingColumn("Parent SKU".into());
        let pipeline_err: PipelineError = query_err.into();
        let server_err: ServerError = pipeline_err.into();
        assert!(server_err.to_string().contains("Parent SKU"));
    }

    #[test]
    fn test_bad_request_format() {
        let err = ServerError::BadRequest("No file provided".into());
        assert_eq!(err.to_string(), "Invalid request: No file provided");
    }
}
