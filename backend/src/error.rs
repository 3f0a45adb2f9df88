//! Error types for the relay.
//!
//! * [`RemoteError`] describes how a call to the remote parsing API went wrong.
//!   It never reaches the browser directly.
//! * [`RelayError`] is what handlers return. It implements
//!   [`actix_web::ResponseError`], so every failure renders as a
//!   `{"message": ...}` JSON body with the matching status code.

use actix_multipart::MultipartError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::responses::MessageResponse;
use serde_json::Value;
use thiserror::Error;

/// Failure of a single call to the remote parsing API.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The remote answered with a non-success HTTP status.
    #[error("{status} for url ({url})")]
    Status { status: u16, url: String, body: String },

    /// No answer within the configured timeout.
    #[error("remote parsing API did not answer within {secs}s")]
    Timeout { secs: u64 },

    /// Connection, TLS or protocol failure.
    #[error("remote request failed: {0}")]
    Transport(String),

    /// The remote answered 2xx but the body could not be read.
    #[error("unreadable remote response: {0}")]
    Decode(String),

    /// Reading the local upload copy failed.
    #[error("local file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Unusable request or job state, or a rejected remote call (400).
    #[error("{message}")]
    BadRequest {
        message: String,
        response: Option<Value>,
    },

    /// The remote parsing API timed out (504).
    #[error("{0}")]
    Timeout(String),

    /// Unexpected local or remote failure (500).
    #[error("Unexpected error: {0}")]
    Internal(String),

    /// Startup configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RelayError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        RelayError::BadRequest {
            message: message.into(),
            response: None,
        }
    }
}

impl From<std::io::Error> for RelayError {
    fn from(err: std::io::Error) -> Self {
        RelayError::Internal(err.to_string())
    }
}

impl From<MultipartError> for RelayError {
    fn from(err: MultipartError) -> Self {
        RelayError::bad_request(format!("Invalid upload: {}", err))
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RelayError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            RelayError::Internal(_) | RelayError::InvalidConfig(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            RelayError::BadRequest { message, response } => MessageResponse {
                message: message.clone(),
                response: response.clone(),
            },
            other => MessageResponse::new(other.to_string()),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::json;

    #[test]
    fn status_codes() {
        assert_eq!(
            RelayError::bad_request("nope").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::Timeout("slow".into()).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            RelayError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn remote_status_display_mentions_url() {
        let e = RemoteError::Status {
            status: 401,
            url: "https://remote/api/parsing/upload".into(),
            body: String::new(),
        };
        let msg = e.to_string();
        assert!(msg.contains("401"), "got: {msg}");
        assert!(msg.contains("/api/parsing/upload"), "got: {msg}");
    }

    #[actix_web::test]
    async fn bad_request_body_carries_remote_payload() {
        let err = RelayError::BadRequest {
            message: "Error: job_id not found in the response".into(),
            response: Some(json!({ "detail": "quota" })),
        };
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let parsed: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["message"], "Error: job_id not found in the response");
        assert_eq!(parsed["response"]["detail"], "quota");
    }

    #[actix_web::test]
    async fn internal_body_has_no_response_field() {
        let err = RelayError::Internal("disk full".into());
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let parsed: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["message"], "Unexpected error: disk full");
        assert!(parsed.get("response").is_none());
    }
}
