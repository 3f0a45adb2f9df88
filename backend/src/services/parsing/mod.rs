//! Relays documents to the remote parsing API and hands the results back.
//!
//! The provided routes are:
//! - `POST /upload`: multipart upload with a `file` field. The document is
//!   spooled to a temporary file, submitted to the remote API, and the returned
//!   job is recorded for the caller's session (a session cookie is issued when
//!   the caller has none). The temporary copy is removed on every exit path.
//!
//! - `GET /poll`: re-queries the remote API for the session's job and returns
//!   `{"status": ...}`. Never fails: without a job the status is `no job`, and
//!   any remote failure is recorded and reported as `error`.
//!
//! - `GET /download`: once the job reports `success`/`completed`, fetches the
//!   markdown rendering and returns it as a `<original-name>.txt` attachment.

use actix_web::web::{get, post, ServiceConfig};

mod download;
mod poll;
mod upload;

/// Registers the relay routes at the application root.
pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.route("/upload", post().to(upload::process))
        .route("/poll", get().to(poll::process))
        .route("/download", get().to(download::process));
}

/// Last path component of a client-supplied file name.
///
/// Browsers on some platforms send the full local path.
fn client_file_name(raw: &str) -> &str {
    raw.rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(raw)
}
