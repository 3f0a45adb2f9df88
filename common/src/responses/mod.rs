use crate::jobs::JobStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `/upload` replies and of every error reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    /// Raw remote payload, attached when the remote answer could not be used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
            response: None,
        }
    }
}

/// Body of `/poll` replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: JobStatus,
}
