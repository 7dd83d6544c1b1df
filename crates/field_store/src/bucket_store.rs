//! S3-compatible bucket template store
//!
//! Objects live under a key prefix:
//!
//! ```text
//! templates/{id}.docx    # raw package bytes
//! templates/{id}.json    # metadata sidecar
//! ```
//!
//! The bucket protocol only offers list + download, so `get` internally
//! lists keys under `templates/{id}` and prefix-matches to find the pair of
//! objects. Callers never see that: the trait surface stays key-based
//! `get`/`put`, and the lookup convention never leaks into the render path.

use crate::error::{FieldStoreError, FieldStoreResult};
use crate::record::{TemplateMetadata, TemplateRecord, TemplateSummary};
use crate::store::FieldStore;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use tracing::debug;

const CONTENT_SUFFIX: &str = ".docx";
const METADATA_SUFFIX: &str = ".json";
const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Bucket-backed implementation of `FieldStore`
///
/// Works against AWS S3 or any S3-compatible endpoint (MinIO, Supabase
/// storage gateways). Network failures surface as
/// `FieldStoreError::Unavailable`, distinct from `NotFound`, so callers can
/// tell "retry or supply bytes directly" from "it is not there".
pub struct BucketFieldStore {
    client: S3Client,
    bucket: String,
    prefix: String,
}

impl BucketFieldStore {
    /// Create a store over an existing S3 client
    pub fn new(client: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: "templates".to_string(),
        }
    }

    /// Create a store with credentials and endpoint from the ambient AWS
    /// environment (env vars, profile, instance metadata)
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self::new(S3Client::new(&config), bucket)
    }

    /// Use a different key prefix than `templates`
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn content_key(&self, id: &str) -> String {
        format!("{}/{}{}", self.prefix, id, CONTENT_SUFFIX)
    }

    fn metadata_key(&self, id: &str) -> String {
        format!("{}/{}{}", self.prefix, id, METADATA_SUFFIX)
    }

    fn id_from_metadata_key<'a>(&self, key: &'a str) -> Option<&'a str> {
        key.strip_prefix(&self.prefix)?
            .strip_prefix('/')?
            .strip_suffix(METADATA_SUFFIX)
    }

    async fn list_keys(&self, prefix: &str) -> FieldStoreResult<Vec<String>> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .send()
            .await
            .map_err(|e| FieldStoreError::Unavailable(e.to_string()))?;

        Ok(output
            .contents()
            .iter()
            .filter_map(|obj| obj.key().map(str::to_string))
            .collect())
    }

    async fn download(&self, key: &str) -> FieldStoreResult<Vec<u8>> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| match &e {
                SdkError::ServiceError(ctx) if ctx.err().is_no_such_key() => {
                    FieldStoreError::NotFound(key.to_string())
                }
                _ => FieldStoreError::Unavailable(e.to_string()),
            })?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| FieldStoreError::Unavailable(e.to_string()))?;
        Ok(bytes.into_bytes().to_vec())
    }

    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> FieldStoreResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| FieldStoreError::Unavailable(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl FieldStore for BucketFieldStore {
    async fn put(&self, record: TemplateRecord) -> FieldStoreResult<()> {
        let metadata = serde_json::to_vec(&record.metadata())?;
        // Content first; a record is only discoverable once its sidecar lands
        self.upload(&self.content_key(&record.id), record.content.clone(), DOCX_CONTENT_TYPE)
            .await?;
        self.upload(&self.metadata_key(&record.id), metadata, "application/json")
            .await?;
        debug!(id = %record.id, bucket = %self.bucket, "uploaded template");
        Ok(())
    }

    async fn get(&self, id: &str) -> FieldStoreResult<TemplateRecord> {
        // List-then-prefix-match: the bucket listing is the source of truth
        // for whether the record exists at all.
        let keys = self.list_keys(&format!("{}/{}", self.prefix, id)).await?;
        let metadata_key = self.metadata_key(id);
        let content_key = self.content_key(id);

        if !keys.iter().any(|k| k == &metadata_key) || !keys.iter().any(|k| k == &content_key) {
            return Err(FieldStoreError::NotFound(id.to_string()));
        }

        let metadata: TemplateMetadata = serde_json::from_slice(&self.download(&metadata_key).await?)?;
        let content = self.download(&content_key).await?;
        Ok(TemplateRecord::from_parts(metadata, content))
    }

    async fn list(&self) -> FieldStoreResult<Vec<TemplateSummary>> {
        let keys = self.list_keys(&format!("{}/", self.prefix)).await?;

        let mut summaries = Vec::new();
        for key in keys {
            if self.id_from_metadata_key(&key).is_some() {
                let metadata: TemplateMetadata =
                    serde_json::from_slice(&self.download(&key).await?)?;
                summaries.push(TemplateSummary::from(&metadata));
            }
        }

        summaries.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then(a.id.cmp(&b.id)));
        Ok(summaries)
    }

    async fn delete(&self, id: &str) -> FieldStoreResult<()> {
        let keys = self.list_keys(&format!("{}/{}", self.prefix, id)).await?;
        if keys.is_empty() {
            return Err(FieldStoreError::NotFound(id.to_string()));
        }

        for key in keys {
            self.client
                .delete_object()
                .bucket(&self.bucket)
                .key(&key)
                .send()
                .await
                .map_err(|e| FieldStoreError::Unavailable(e.to_string()))?;
        }
        debug!(id, bucket = %self.bucket, "deleted template");
        Ok(())
    }
}
