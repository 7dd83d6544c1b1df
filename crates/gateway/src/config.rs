//! Gateway configuration
//!
//! Everything comes from the environment; the storage backend is picked
//! once at startup and never inside the render path.

use field_store::{FieldStore, FileFieldStore, MemoryFieldStore};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_API_KEY: &str = "TEST";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid storage spec {0:?}: expected \"memory\" or \"file:<dir>\"")]
    InvalidStorage(String),
}

/// Which persistence backend the gateway runs against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Templates live only for the process lifetime
    Memory,
    /// Templates persist in a local directory
    File(PathBuf),
}

impl StorageBackend {
    /// Parse a `SMARTDOC_STORAGE` value
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        match spec {
            "memory" => Ok(Self::Memory),
            other => match other.strip_prefix("file:") {
                Some(dir) if !dir.is_empty() => Ok(Self::File(PathBuf::from(dir))),
                _ => Err(ConfigError::InvalidStorage(spec.to_string())),
            },
        }
    }

    /// Construct the store this backend describes
    pub fn build(&self) -> Arc<dyn FieldStore> {
        match self {
            Self::Memory => Arc::new(MemoryFieldStore::new()),
            Self::File(dir) => Arc::new(FileFieldStore::new(dir.clone())),
        }
    }
}

/// Gateway runtime configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bind address
    pub addr: String,
    /// Key checked against fill/upload/delete requests
    pub api_key: String,
    /// Persistence backend
    pub storage: StorageBackend,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            storage: StorageBackend::Memory,
        }
    }
}

impl GatewayConfig {
    /// Read configuration from `SMARTDOC_ADDR`, `SMARTDOC_API_KEY`, and
    /// `SMARTDOC_STORAGE`, falling back to defaults when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = std::env::var("SMARTDOC_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let api_key =
            std::env::var("SMARTDOC_API_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_string());
        let storage = match std::env::var("SMARTDOC_STORAGE") {
            Ok(spec) => StorageBackend::parse(&spec)?,
            Err(_) => StorageBackend::Memory,
        };
        Ok(Self {
            addr,
            api_key,
            storage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_memory() {
        assert_eq!(StorageBackend::parse("memory").unwrap(), StorageBackend::Memory);
    }

    #[test]
    fn test_parse_file_backend() {
        assert_eq!(
            StorageBackend::parse("file:/var/lib/smartdoc").unwrap(),
            StorageBackend::File(PathBuf::from("/var/lib/smartdoc"))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_spec() {
        assert!(StorageBackend::parse("redis://x").is_err());
        assert!(StorageBackend::parse("file:").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.addr, "0.0.0.0:8080");
        assert_eq!(config.api_key, "TEST");
        assert_eq!(config.storage, StorageBackend::Memory);
    }
}
