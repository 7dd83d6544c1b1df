//! Error types for template filling

use thiserror::Error;

/// Errors that can occur while rendering a template
#[derive(Debug, Error)]
pub enum FillError {
    /// The underlying package could not be read or re-serialized
    #[error("package error: {0}")]
    Pack(#[from] doc_pack::PackError),
}

pub type Result<T> = std::result::Result<T, FillError>;
