//! Error types for template storage

use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum FieldStoreError {
    /// No template stored under the given id
    #[error("Template not found: {0}")]
    NotFound(String),

    /// The uploaded package scanned to an empty field set
    #[error("Template contains no placeholders")]
    NoPlaceholders,

    /// The uploaded bytes are not a readable DOCX package
    #[error("Malformed template package: {0}")]
    Malformed(String),

    /// The backend is unreachable; render-by-id callers can retry or supply
    /// template bytes directly
    #[error("Field store unavailable: {0}")]
    Unavailable(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Metadata serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations
pub type FieldStoreResult<T> = std::result::Result<T, FieldStoreError>;
