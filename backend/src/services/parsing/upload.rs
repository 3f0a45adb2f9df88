use super::client_file_name;
use crate::config::RelayConfig;
use crate::error::{RelayError, RemoteError};
use crate::job_controller::session::{new_session_id, session_cookie, session_id};
use crate::job_controller::state::JobsState;
use crate::parsing_api::{ParsingApi, UploadReceipt};
use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use common::jobs::{Job, JobStatus};
use common::responses::MessageResponse;
use futures_util::StreamExt;
use log::{info, warn};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

const DEFAULT_SUFFIX: &str = ".pdf";

/// A document received from the client, spooled to a temporary file.
struct ReceivedFile {
    file_name: String,
    temp: NamedTempFile,
}

/// Actix handler for `POST /upload`.
///
/// - `200 OK` with a confirmation message and the session cookie on success.
/// - `400 Bad Request` when the `file` field is missing, the remote API rejects
///   the upload, or its answer carries no job id (the raw answer is attached).
/// - `504 Gateway Timeout` when the remote API does not answer in time.
/// - `500 Internal Server Error` for anything else.
pub(crate) async fn process(
    req: HttpRequest,
    payload: Multipart,
    jobs: web::Data<JobsState>,
    api: web::Data<dyn ParsingApi>,
    config: web::Data<RelayConfig>,
) -> Result<HttpResponse, RelayError> {
    let session = session_id(&req).unwrap_or_else(new_session_id);
    let received = receive_file(payload).await?;

    info!("Submitting '{}' to the parsing API", received.file_name);
    let outcome = api.upload(&received.file_name, received.temp.path()).await;

    let ReceivedFile { file_name, temp } = received;
    let temp_path = temp.path().to_path_buf();
    if let Err(e) = temp.close() {
        warn!("Could not remove upload copy {}: {}", temp_path.display(), e);
    }

    let receipt = outcome.map_err(upload_error)?;
    let job = accept_receipt(receipt, file_name)?;
    info!("Started job {} ({})", job.id, job.status);
    jobs.replace(&session, job).await;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&session, config.cookie_secure))
        .json(MessageResponse::new("File uploaded successfully, job started.")))
}

/// Reads the `file` field of the multipart body into a temporary file.
///
/// Other fields are skipped.
async fn receive_file(mut payload: Multipart) -> Result<ReceivedFile, RelayError> {
    while let Some(item) = payload.next().await {
        let mut field = item?;
        let field_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if field_name.as_deref() != Some("file") {
            continue;
        }

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| client_file_name(f).to_string()))
            .unwrap_or_default();

        let mut temp = tempfile::Builder::new()
            .prefix("relay-upload-")
            .suffix(&upload_suffix(&file_name))
            .tempfile()?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            while let Some(chunk) = field.next().await {
                writer.write_all(&chunk?)?;
            }
            writer.flush()?;
        }
        return Ok(ReceivedFile { file_name, temp });
    }
    Err(RelayError::bad_request("No file part in the request"))
}

/// Keeps the client's extension on the temporary copy.
fn upload_suffix(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_else(|| DEFAULT_SUFFIX.to_string())
}

fn accept_receipt(receipt: UploadReceipt, file_name: String) -> Result<Job, RelayError> {
    let Some(id) = receipt.id else {
        warn!("Upload answer carried no job id: {}", receipt.raw);
        return Err(RelayError::BadRequest {
            message: "Error: job_id not found in the response".to_string(),
            response: Some(receipt.raw),
        });
    };
    Ok(Job {
        id,
        status: receipt.status.map(JobStatus::new).unwrap_or_default(),
        original_file_name: file_name,
    })
}

fn upload_error(err: RemoteError) -> RelayError {
    warn!("Upload to the parsing API failed: {}", err);
    match &err {
        RemoteError::Status { .. } => {
            RelayError::bad_request(format!("Error uploading file: {}", err))
        }
        RemoteError::Timeout { .. } => RelayError::Timeout(format!("Error uploading file: {}", err)),
        _ => RelayError::Internal(err.to_string()),
    }
}
