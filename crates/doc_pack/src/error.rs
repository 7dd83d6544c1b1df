//! Error types for package I/O

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Missing package part: {0}")]
    MissingPart(String),

    #[error("Package part is not valid UTF-8: {0}")]
    PartEncoding(String),
}

pub type PackResult<T> = std::result::Result<T, PackError>;
