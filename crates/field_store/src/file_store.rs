//! Filesystem template store
//!
//! # Directory structure
//!
//! ```text
//! templates/
//! ├── {id}.docx    # raw package bytes, exactly as uploaded
//! └── {id}.json    # metadata sidecar (name, fields, uploaded_at)
//! ```
//!
//! The sidecar keeps listing cheap: `list` parses small JSON files and never
//! touches the package bytes.

use crate::error::{FieldStoreError, FieldStoreResult};
use crate::record::{TemplateMetadata, TemplateRecord, TemplateSummary};
use crate::store::FieldStore;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

const CONTENT_EXTENSION: &str = "docx";
const METADATA_EXTENSION: &str = "json";

/// File-based implementation of `FieldStore`
///
/// Content is written before the sidecar on `put`, so a record is only
/// listable once its bytes are fully on disk.
#[derive(Debug)]
pub struct FileFieldStore {
    base_path: PathBuf,
}

impl FileFieldStore {
    /// Create a store rooted at the given directory
    ///
    /// The directory is created lazily on first write.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn content_path(&self, id: &str) -> PathBuf {
        self.base_path.join(format!("{id}.{CONTENT_EXTENSION}"))
    }

    fn metadata_path(&self, id: &str) -> PathBuf {
        self.base_path.join(format!("{id}.{METADATA_EXTENSION}"))
    }

    /// Ids are UUIDs we minted ourselves; anything that could walk out of
    /// the store directory is treated as absent.
    fn check_id(id: &str) -> FieldStoreResult<()> {
        if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
            return Err(FieldStoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn read_metadata(&self, id: &str) -> FieldStoreResult<TemplateMetadata> {
        let bytes = match fs::read(self.metadata_path(id)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FieldStoreError::NotFound(id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl FieldStore for FileFieldStore {
    async fn put(&self, record: TemplateRecord) -> FieldStoreResult<()> {
        Self::check_id(&record.id)?;
        fs::create_dir_all(&self.base_path).await?;

        fs::write(self.content_path(&record.id), &record.content).await?;
        let metadata = serde_json::to_vec_pretty(&record.metadata())?;
        fs::write(self.metadata_path(&record.id), metadata).await?;

        debug!(id = %record.id, name = %record.name, "stored template");
        Ok(())
    }

    async fn get(&self, id: &str) -> FieldStoreResult<TemplateRecord> {
        Self::check_id(id)?;
        let metadata = self.read_metadata(id).await?;
        let content = match fs::read(self.content_path(id)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FieldStoreError::NotFound(id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(TemplateRecord::from_parts(metadata, content))
    }

    async fn list(&self) -> FieldStoreResult<Vec<TemplateSummary>> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            // A store nothing was ever written to is just empty
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut summaries = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().map(|e| e == METADATA_EXTENSION).unwrap_or(false) {
                let bytes = fs::read(&path).await?;
                match serde_json::from_slice::<TemplateMetadata>(&bytes) {
                    Ok(metadata) => summaries.push(TemplateSummary::from(&metadata)),
                    Err(e) => debug!(path = %path.display(), error = %e, "skipping unreadable sidecar"),
                }
            }
        }

        summaries.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then(a.id.cmp(&b.id)));
        Ok(summaries)
    }

    async fn delete(&self, id: &str) -> FieldStoreResult<()> {
        Self::check_id(id)?;
        match fs::remove_file(self.metadata_path(id)).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FieldStoreError::NotFound(id.to_string()))
            }
            Err(e) => return Err(e.into()),
        }
        match fs::remove_file(self.content_path(id)).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        debug!(id, "deleted template");
        Ok(())
    }
}
