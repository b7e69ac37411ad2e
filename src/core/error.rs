/// pgkit Error Module
///
/// This module defines the error types for the pgkit crate. Every failure
/// surfaces to the immediate caller; nothing in this layer catches or
/// retries.
use thiserror::Error;

/// Error type covering all failure modes of the helper:
/// - Connection establishment and teardown
/// - Statement execution rejected by the database engine
/// - Request contract violations caught before any SQL is emitted
/// - Construction/configuration problems
#[derive(Error, Debug)]
pub enum PgkitError {
    /// Transport or authentication failure while opening or closing a
    /// connection. Never retried.
    #[error("Connection error: {0}")]
    Connection(String),

    /// SQL rejected by the engine (syntax error, constraint violation),
    /// or a failure inside the statement's transaction scope.
    #[error("Statement error: {0}")]
    Statement(String),

    /// The request violates the API contract: mismatched field/value
    /// lists, an update with no target, a reshape over absent data.
    /// These are caught here instead of emitting malformed SQL.
    #[error("Contract violation: {0}")]
    Contract(String),

    /// Construction and configuration errors (invalid URI, a config file
    /// selecting both connection modes, missing credentials).
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors from the request wire format
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Result to use PgkitError as the error type.
pub type Result<T> = std::result::Result<T, PgkitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let conn_err = PgkitError::Connection("refused".to_string());
        assert!(conn_err.to_string().contains("Connection error"));

        let stmt_err = PgkitError::Statement("syntax error at or near".to_string());
        assert!(stmt_err.to_string().contains("Statement error"));

        let contract_err = PgkitError::Contract("fields and values differ in length".to_string());
        assert!(contract_err.to_string().contains("Contract violation"));

        let config_err = PgkitError::Config("both uri and host set".to_string());
        assert!(config_err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PgkitError = io_err.into();
        match err {
            PgkitError::Io(_) => {}
            _ => panic!("Expected IO error"),
        }

        let json_err: std::result::Result<serde_json::Value, serde_json::Error> =
            serde_json::from_str("{ invalid json }");
        let err: PgkitError = json_err.unwrap_err().into();
        match err {
            PgkitError::Json(_) => {}
            _ => panic!("Expected JSON error"),
        }
    }
}
