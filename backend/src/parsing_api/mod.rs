//! Access to the remote document-parsing service.
//!
//! Handlers only see the [`ParsingApi`] trait; the production implementation is
//! [`LlamaParseClient`]. Each method performs exactly one remote call: there are
//! no retries at this layer or above.

mod client;

pub use client::LlamaParseClient;

use crate::error::RemoteError;
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

/// What the remote API answered to an upload.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    /// Remote job id, `None` when the answer carried no usable id.
    pub id: Option<String>,
    pub status: Option<String>,
    /// The full remote answer, kept for diagnostics.
    pub raw: Value,
}

impl UploadReceipt {
    pub fn from_value(raw: Value) -> Self {
        UploadReceipt {
            id: string_field(&raw, "id"),
            status: string_field(&raw, "status"),
            raw,
        }
    }
}

/// Reads a non-empty string field of a JSON object.
pub(crate) fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[async_trait]
pub trait ParsingApi: Send + Sync {
    /// Submits the document stored at `path` under the client's `file_name`.
    async fn upload(&self, file_name: &str, path: &Path) -> Result<UploadReceipt, RemoteError>;

    /// Current remote status of a job; `Ok(None)` when the answer has no status.
    async fn job_status(&self, job_id: &str) -> Result<Option<String>, RemoteError>;

    /// Markdown rendering of a finished job, as returned by the remote.
    async fn result_markdown(&self, job_id: &str) -> Result<String, RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn receipt_reads_id_and_status() {
        let receipt = UploadReceipt::from_value(json!({ "id": "J1", "status": "PENDING" }));
        assert_eq!(receipt.id.as_deref(), Some("J1"));
        assert_eq!(receipt.status.as_deref(), Some("PENDING"));
    }

    #[test]
    fn receipt_treats_empty_or_non_string_id_as_missing() {
        assert!(UploadReceipt::from_value(json!({ "id": "" })).id.is_none());
        assert!(UploadReceipt::from_value(json!({ "id": 42 })).id.is_none());
        assert!(UploadReceipt::from_value(json!({ "detail": "Unauthorized" })).id.is_none());
    }
}
