//! Storage abstraction for template records
//!
//! The trait is backend-agnostic: the renderer and gateway only ever see
//! key-based `get`/`put`, whatever lookup protocol a backend speaks
//! internally. Implementations must be thread-safe; methods take `&self`
//! so backends use interior locking or handle-cloning clients.

use crate::error::FieldStoreResult;
use crate::record::{TemplateRecord, TemplateSummary};
use async_trait::async_trait;

/// Trait for template storage backends
///
/// Stored records are treated as immutable: `put` with an existing id is a
/// whole-record replace, never a partial edit. That is what makes concurrent
/// fills of one template safe without any mutation lock.
#[async_trait]
pub trait FieldStore: Send + Sync {
    /// Store a record, replacing any existing record with the same id
    async fn put(&self, record: TemplateRecord) -> FieldStoreResult<()>;

    /// Fetch a record by id
    async fn get(&self, id: &str) -> FieldStoreResult<TemplateRecord>;

    /// List summaries of all stored records, newest first
    async fn list(&self) -> FieldStoreResult<Vec<TemplateSummary>>;

    /// Delete a record by id
    async fn delete(&self, id: &str) -> FieldStoreResult<()>;
}
