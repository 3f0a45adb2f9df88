use super::{string_field, ParsingApi, UploadReceipt};
use crate::error::RemoteError;
use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

const UPLOAD_PATH: &str = "/api/parsing/upload";
const JOB_PATH: &str = "/api/parsing/job";
const FALLBACK_MIME: &str = "application/pdf";

/// [`ParsingApi`] over HTTP, speaking the LlamaParse job API.
#[derive(Clone)]
pub struct LlamaParseClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl LlamaParseClient {
    /// Builds a client whose every request is bounded by `timeout`.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Ok(LlamaParseClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        // The header is always sent; an unset key yields a remote 401 at request time.
        let key = self.api_key.as_deref().unwrap_or_default();
        request.header(AUTHORIZATION, format!("Bearer {key}"))
    }

    /// Sends the request and turns timeouts, transport errors and non-2xx
    /// answers into [`RemoteError`]s.
    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, RemoteError> {
        let response = self.authorized(request).send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        debug!("{} answered {}", url, status);
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(RemoteError::Status {
            status: status.as_u16(),
            url: url.to_string(),
            body,
        })
    }

    fn classify(&self, err: reqwest::Error) -> RemoteError {
        if err.is_timeout() {
            RemoteError::Timeout {
                secs: self.timeout.as_secs(),
            }
        } else {
            RemoteError::Transport(err.to_string())
        }
    }

    async fn json(&self, response: Response) -> Result<Value, RemoteError> {
        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                self.classify(e)
            } else {
                RemoteError::Decode(e.to_string())
            }
        })
    }
}

#[async_trait]
impl ParsingApi for LlamaParseClient {
    async fn upload(&self, file_name: &str, path: &Path) -> Result<UploadReceipt, RemoteError> {
        let bytes = tokio::fs::read(path).await?;
        let mime = mime_guess::from_path(file_name)
            .first_raw()
            .unwrap_or(FALLBACK_MIME);
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        let form = Form::new().part("file", part);

        let url = self.url(UPLOAD_PATH);
        let request = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .multipart(form);
        let response = self.send(request, &url).await?;
        Ok(UploadReceipt::from_value(self.json(response).await?))
    }

    async fn job_status(&self, job_id: &str) -> Result<Option<String>, RemoteError> {
        let url = self.url(&format!("{JOB_PATH}/{job_id}"));
        let response = self.send(self.http.get(&url), &url).await?;
        let body = self.json(response).await?;
        Ok(string_field(&body, "status"))
    }

    async fn result_markdown(&self, job_id: &str) -> Result<String, RemoteError> {
        let url = self.url(&format!("{JOB_PATH}/{job_id}/result/markdown"));
        let response = self.send(self.http.get(&url), &url).await?;
        response.text().await.map_err(|e| {
            if e.is_timeout() {
                self.classify(e)
            } else {
                RemoteError::Decode(e.to_string())
            }
        })
    }
}
