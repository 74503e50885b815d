//! Error types for slidecut library.

use std::io;
use thiserror::Error;

/// Result type alias for slidecut operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while segmenting or rendering a document.
///
/// The total entry points ([`crate::generate_slides`] and friends) never
/// return these; they recover locally or fall back to a placeholder slide.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The host document could not be reached.
    #[error("Could not access host document: {0}")]
    HostAccess(String),

    /// The document JSON does not describe a block tree.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A structured media payload could not be decoded.
    #[error("Invalid media payload: {0}")]
    InvalidPayload(String),

    /// Error during rendering (HTML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::HostAccess("editor detached".into());
        assert_eq!(
            err.to_string(),
            "Could not access host document: editor detached"
        );

        let err = Error::InvalidPayload("expected object".into());
        assert_eq!(err.to_string(), "Invalid media payload: expected object");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
