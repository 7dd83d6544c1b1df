//! Request and response types for the HTTP API

use chrono::{DateTime, Utc};
use field_store::{TemplateRecord, TemplateSummary};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// MIME type of a rendered document
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Body of `POST /api/v1/fill`
///
/// Exactly one of `template` (base64 package bytes) and `template_id`
/// (a stored template) must be set. `data` maps field names to values;
/// unknown keys are ignored and missing known fields render empty, so a
/// partially filled form is always a valid request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillRequest {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default)]
    pub data: HashMap<String, String>,
}

/// Body of `POST /api/v1/templates`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    pub api_key: String,
    pub name: String,
    /// Base64-encoded `.docx` bytes
    pub content: String,
}

/// A stored template as returned by the templates API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateResponse {
    pub id: String,
    pub name: String,
    pub fields: Vec<String>,
    pub field_count: usize,
    pub uploaded_at: DateTime<Utc>,
}

impl From<&TemplateRecord> for TemplateResponse {
    fn from(record: &TemplateRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            fields: record.fields.clone(),
            field_count: record.fields.len(),
            uploaded_at: record.uploaded_at,
        }
    }
}

/// Listing row for `GET /api/v1/templates`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateListResponse {
    pub templates: Vec<TemplateSummary>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// JSON error body; a failed request never carries a partial document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
