use super::client_file_name;
use crate::error::{RelayError, RemoteError};
use crate::job_controller::session::session_id;
use crate::job_controller::state::JobsState;
use crate::parsing_api::ParsingApi;
use actix_files::NamedFile;
use actix_web::http::header::{
    Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
};
use actix_web::{web, HttpRequest, HttpResponse};
use log::{info, warn};
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

const FALLBACK_BASE_NAME: &str = "result";

/// Actix handler for `GET /download`.
///
/// - `200 OK` with the job's text as a `<base-name>.txt` attachment.
/// - `400 Bad Request` when the job is missing or not finished (no remote call
///   is made), or when the remote API refuses the result.
/// - `504 Gateway Timeout` when the remote API does not answer in time.
pub(crate) async fn process(
    req: HttpRequest,
    jobs: web::Data<JobsState>,
    api: web::Data<dyn ParsingApi>,
) -> Result<HttpResponse, RelayError> {
    let job = match session_id(&req) {
        Some(session) => jobs.get(&session).await,
        None => None,
    };
    let job = job
        .filter(|job| job.status.is_complete())
        .ok_or_else(|| RelayError::bad_request("Job is not completed yet"))?;

    let markdown = api.result_markdown(&job.id).await.map_err(download_error)?;
    let text = normalize_newlines(&markdown);
    let file_name = result_file_name(&job.original_file_name);
    info!("Sending result of job {} as {}", job.id, file_name);

    // The spool file is unnamed: the OS reclaims it once the response body
    // drops its handle.
    let file = spool(&text)?;
    let named = NamedFile::from_file(file, &file_name)?
        .set_content_disposition(attachment(&file_name));
    Ok(named.into_response(&req))
}

/// `attachment` disposition for `file_name`.
///
/// `filename` stays ASCII so the header is a valid token string; non-ASCII
/// names travel in `filename*=UTF-8''...`, which browsers prefer.
fn attachment(file_name: &str) -> ContentDisposition {
    let ascii_name: String = file_name
        .chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() && c != '"' { c } else { '_' })
        .collect();
    let mut parameters = vec![DispositionParam::Filename(ascii_name)];
    if !file_name.is_ascii() {
        parameters.push(DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".to_string()),
            language_tag: None,
            value: file_name.as_bytes().to_vec(),
        }));
    }
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters,
    }
}

/// Replaces escaped newline sequences (`\` followed by `n`) with line feeds.
fn normalize_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// `report.pdf` -> `report.txt`.
fn result_file_name(original: &str) -> String {
    let stem = Path::new(client_file_name(original))
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_BASE_NAME);
    format!("{stem}.txt")
}

fn spool(text: &str) -> std::io::Result<File> {
    let mut file = tempfile::tempfile()?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    file.seek(SeekFrom::Start(0))?;
    Ok(file)
}

fn download_error(err: RemoteError) -> RelayError {
    warn!("Fetching the result failed: {}", err);
    match &err {
        RemoteError::Status { .. } => RelayError::bad_request("Error retrieving the result"),
        RemoteError::Timeout { .. } => {
            RelayError::Timeout(format!("Error retrieving the result: {}", err))
        }
        _ => RelayError::Internal(err.to_string()),
    }
}
