//! Template persistence
//!
//! This crate owns the template record model, the upload ingestion policy
//! (derive the field set, reject placeholder-free documents, assign an id),
//! and the `FieldStore` trait with three backends:
//!
//! - `MemoryFieldStore` — `RwLock<HashMap>`, for tests and ephemeral setups
//! - `FileFieldStore` — a directory of `{id}.docx` + `{id}.json` sidecars
//! - `BucketFieldStore` (feature `s3`) — S3-compatible object storage
//!
//! Stored records are immutable; re-storing an id replaces the record
//! whole. The renderer never mutates stored content, which is why multiple
//! simultaneous fills of the same template need no coordination.

mod error;
mod file_store;
mod memory_store;
mod record;
mod store;

#[cfg(feature = "s3")]
mod bucket_store;

pub use error::{FieldStoreError, FieldStoreResult};
pub use file_store::FileFieldStore;
pub use memory_store::MemoryFieldStore;
pub use record::{ingest_template, TemplateMetadata, TemplateRecord, TemplateSummary};
pub use store::FieldStore;

#[cfg(feature = "s3")]
pub use bucket_store::BucketFieldStore;
