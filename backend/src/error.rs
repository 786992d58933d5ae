//! Error types for the Railcat import pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`RosterError`] - Roster document parsing errors
//! - [`CsvError`] - CSV blob parsing errors
//! - [`ItemError`] - Per-item import failures (never escape a batch)
//! - [`StoreError`] - Record store / audit sink failures (abort a batch)
//! - [`ServerError`] - HTTP layer errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Roster Document Errors
// =============================================================================

/// Errors while reading one vendor roster document.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The markup could not be parsed at all.
    #[error("Error parsing XML: {0}")]
    MalformedInput(String),
}

impl From<roxmltree::Error> for RosterError {
    fn from(err: roxmltree::Error) -> Self {
        RosterError::MalformedInput(err.to_string())
    }
}

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors while parsing a whole CSV blob.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Nothing to parse.
    #[error("CSV vacío")]
    EmptyFile,

    /// No header row found.
    #[error("No se encontró la fila de cabecera")]
    NoHeaders,

    /// Invalid CSV format.
    #[error("Formato CSV inválido: {0}")]
    ParseError(String),
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        CsvError::ParseError(err.to_string())
    }
}

// =============================================================================
// Item Errors
// =============================================================================

/// Why a single batch item was skipped.
///
/// Every variant is caught at the item boundary by the orchestrators and
/// turned into an entry of the report's error list.
#[derive(Debug, Error)]
pub enum ItemError {
    /// The item could not be parsed at all.
    #[error("{0}")]
    MalformedInput(String),

    /// Well-formed document without a locomotive node.
    #[error("No se encontró elemento locomotive")]
    RecordNotFound,

    /// A required scalar is absent or not numeric.
    #[error("Campo obligatorio ausente o inválido: {field}")]
    MissingRequiredField { field: String },

    /// The assembled record was rejected.
    #[error("Validación fallida: {}", .errors.join("; "))]
    Validation { errors: Vec<String> },
}

impl ItemError {
    pub fn missing(field: impl Into<String>) -> Self {
        ItemError::MissingRequiredField { field: field.into() }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ItemError::Validation { errors: vec![message.into()] }
    }
}

impl From<RosterError> for ItemError {
    fn from(err: RosterError) -> Self {
        ItemError::MalformedInput(err.to_string())
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Failures of the record store or audit sink.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("Store IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error.
    #[error("Store JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The backing store cannot be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for roster document operations.
pub type RosterResult<T> = Result<T, RosterError>;

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for per-item import steps.
pub type ItemResult<T> = Result<T, ItemError>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_error_becomes_malformed_item() {
        let err = RosterError::MalformedInput("unexpected end of stream".into());
        let item: ItemError = err.into();
        assert!(matches!(item, ItemError::MalformedInput(_)));
        assert!(item.to_string().starts_with("Error parsing XML"));
    }

    #[test]
    fn test_record_not_found_message() {
        assert_eq!(
            ItemError::RecordNotFound.to_string(),
            "No se encontró elemento locomotive"
        );
    }

    #[test]
    fn test_validation_error_format() {
        let err = ItemError::Validation {
            errors: vec!["price must be >= 0".into(), "bad condition".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("price must be >= 0"));
        assert!(msg.contains("bad condition"));
    }

    #[test]
    fn test_store_error_into_server_error() {
        let err = StoreError::Unavailable("disk gone".into());
        let server: ServerError = err.into();
        assert!(server.to_string().contains("disk gone"));
    }
}
