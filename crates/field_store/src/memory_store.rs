//! In-memory template store
//!
//! Keeps every record in a `RwLock<HashMap>`. Nothing survives a restart;
//! this backend exists for development, tests, and single-shot deployments
//! where templates always arrive by value.

use crate::error::{FieldStoreError, FieldStoreResult};
use crate::record::{TemplateRecord, TemplateSummary};
use crate::store::FieldStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory implementation of `FieldStore`
///
/// Thread-safe: reads take a shared lock, writes an exclusive one. Share
/// across tasks with `Arc`.
#[derive(Debug, Default)]
pub struct MemoryFieldStore {
    records: RwLock<HashMap<String, TemplateRecord>>,
}

impl MemoryFieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().expect("store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FieldStore for MemoryFieldStore {
    async fn put(&self, record: TemplateRecord) -> FieldStoreResult<()> {
        let mut records = self.records.write().expect("store lock poisoned");
        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &str) -> FieldStoreResult<TemplateRecord> {
        let records = self.records.read().expect("store lock poisoned");
        records
            .get(id)
            .cloned()
            .ok_or_else(|| FieldStoreError::NotFound(id.to_string()))
    }

    async fn list(&self) -> FieldStoreResult<Vec<TemplateSummary>> {
        let records = self.records.read().expect("store lock poisoned");
        let mut summaries: Vec<TemplateSummary> =
            records.values().map(TemplateRecord::summary).collect();
        summaries.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then(a.id.cmp(&b.id)));
        Ok(summaries)
    }

    async fn delete(&self, id: &str) -> FieldStoreResult<()> {
        let mut records = self.records.write().expect("store lock poisoned");
        records
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| FieldStoreError::NotFound(id.to_string()))
    }
}
