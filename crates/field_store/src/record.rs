//! Template records and the upload ingestion policy

use crate::error::{FieldStoreError, FieldStoreResult};
use chrono::{DateTime, Utc};
use doc_pack::DocPackage;
use fill_engine::scan_placeholders;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored template: raw package bytes plus the derived field set
///
/// Records are immutable once stored. The id is assigned at ingestion and
/// never changes; re-storing under the same id is a whole-record replace.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateRecord {
    /// Unique template id (v4 UUID)
    pub id: String,
    /// Original file name supplied at upload
    pub name: String,
    /// Raw `.docx` bytes
    pub content: Vec<u8>,
    /// Placeholder identifiers in first-seen document order
    pub fields: Vec<String>,
    /// Upload timestamp
    pub uploaded_at: DateTime<Utc>,
}

/// Everything about a record except its content bytes
///
/// File and bucket backends persist this as a JSON sidecar next to the raw
/// package, so listing never has to download or parse documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    pub id: String,
    pub name: String,
    pub fields: Vec<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// Listing row handed to UIs and the templates API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
    pub field_count: usize,
    pub uploaded_at: DateTime<Utc>,
}

impl TemplateRecord {
    /// Reassemble a record from its sidecar metadata and content bytes
    pub fn from_parts(metadata: TemplateMetadata, content: Vec<u8>) -> Self {
        Self {
            id: metadata.id,
            name: metadata.name,
            content,
            fields: metadata.fields,
            uploaded_at: metadata.uploaded_at,
        }
    }

    pub fn metadata(&self) -> TemplateMetadata {
        TemplateMetadata {
            id: self.id.clone(),
            name: self.name.clone(),
            fields: self.fields.clone(),
            uploaded_at: self.uploaded_at,
        }
    }

    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            field_count: self.fields.len(),
            uploaded_at: self.uploaded_at,
        }
    }
}

impl From<&TemplateMetadata> for TemplateSummary {
    fn from(meta: &TemplateMetadata) -> Self {
        Self {
            id: meta.id.clone(),
            name: meta.name.clone(),
            field_count: meta.fields.len(),
            uploaded_at: meta.uploaded_at,
        }
    }
}

/// Turn uploaded bytes into a storable record
///
/// Opens the package, scans the body for placeholders, and rejects uploads
/// whose field set is empty: a document with no `{identifier}` tokens is
/// not a fillable template. The id and timestamp are assigned here.
pub fn ingest_template(name: impl Into<String>, content: Vec<u8>) -> FieldStoreResult<TemplateRecord> {
    let package =
        DocPackage::open(&content).map_err(|e| FieldStoreError::Malformed(e.to_string()))?;
    let body = package
        .document_xml()
        .map_err(|e| FieldStoreError::Malformed(e.to_string()))?;

    let fields = scan_placeholders(body);
    if fields.is_empty() {
        return Err(FieldStoreError::NoPlaceholders);
    }

    Ok(TemplateRecord {
        id: Uuid::new_v4().to_string(),
        name: name.into(),
        content,
        fields,
        uploaded_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::docx_with_body;

    #[test]
    fn test_ingest_assigns_id_and_fields() {
        let bytes = docx_with_body("<w:t>Dear {name}, re {subject}</w:t>");
        let record = ingest_template("letter.docx", bytes).unwrap();

        assert_eq!(record.name, "letter.docx");
        assert_eq!(record.fields, vec!["name", "subject"]);
        assert_eq!(Uuid::parse_str(&record.id).unwrap().get_version_num(), 4);
    }

    #[test]
    fn test_ingest_rejects_placeholder_free_document() {
        let bytes = docx_with_body("<w:t>Nothing to fill here</w:t>");
        let result = ingest_template("plain.docx", bytes);
        assert!(matches!(result, Err(FieldStoreError::NoPlaceholders)));
    }

    #[test]
    fn test_ingest_rejects_garbage_bytes() {
        let result = ingest_template("bad.docx", b"not a zip".to_vec());
        assert!(matches!(result, Err(FieldStoreError::Malformed(_))));
    }

    #[test]
    fn test_summary_from_record() {
        let bytes = docx_with_body("<w:t>{a} {b}</w:t>");
        let record = ingest_template("t.docx", bytes).unwrap();
        let summary = record.summary();
        assert_eq!(summary.id, record.id);
        assert_eq!(summary.field_count, 2);
    }

    #[test]
    fn test_metadata_round_trip() {
        let bytes = docx_with_body("<w:t>{a}</w:t>");
        let record = ingest_template("t.docx", bytes).unwrap();
        let json = serde_json::to_string(&record.metadata()).unwrap();
        let meta: TemplateMetadata = serde_json::from_str(&json).unwrap();
        let rebuilt = TemplateRecord::from_parts(meta, record.content.clone());
        assert_eq!(rebuilt, record);
    }
}
