//! Error types for Backlog API operations.

use thiserror::Error;

/// Errors that can occur during Backlog API operations.
#[derive(Debug, Error)]
pub enum BacklogError {
    /// Client configuration is invalid or incomplete.
    #[error("invalid Backlog configuration: {0}")]
    InvalidConfig(String),

    /// A required field was absent from a JSON payload during mapping.
    ///
    /// Signals a schema mismatch between this client and the server
    /// response; the entity is not constructed at all.
    #[error("required field '{field}' missing from {entity} payload")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// A field was present but held a value of an unexpected JSON type.
    #[error("field '{field}' of {entity} payload is not {expected}")]
    UnexpectedType {
        entity: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    /// An integer code outside a fixed enumeration table.
    #[error("unknown {entity} code: {value}")]
    UnknownEnumValue { entity: &'static str, value: i64 },

    /// A timestamp string that does not match `YYYY-MM-DDTHH:MM:SSZ`.
    #[error("timestamp '{0}' does not match format YYYY-MM-DDTHH:MM:SSZ")]
    InvalidTimestamp(String),

    /// Reverse mapping met a value it cannot render as JSON.
    ///
    /// Indicates a defect (a field added to a model without updating its
    /// mapping), not a normal runtime condition.
    #[error("value cannot be rendered as JSON: {0}")]
    UnsupportedValue(String),

    /// API request returned a non-success status.
    #[error("Backlog API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for Backlog operations.
pub type Result<T> = core::result::Result<T, BacklogError>;
