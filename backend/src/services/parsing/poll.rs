use crate::job_controller::session::session_id;
use crate::job_controller::state::JobsState;
use crate::parsing_api::ParsingApi;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::jobs::JobStatus;
use common::responses::StatusResponse;
use log::{debug, info, warn};

/// Actix handler for `GET /poll`. Always answers `200 OK` with `{"status": ...}`.
pub(crate) async fn process(
    req: HttpRequest,
    jobs: web::Data<JobsState>,
    api: web::Data<dyn ParsingApi>,
) -> impl Responder {
    let status = poll_status(&req, &jobs, api.get_ref()).await;
    HttpResponse::Ok().json(StatusResponse { status })
}

/// Refreshes the session's job status from the remote API.
///
/// Remote failures of any kind are recorded as `error` instead of being
/// propagated.
async fn poll_status(req: &HttpRequest, jobs: &JobsState, api: &dyn ParsingApi) -> JobStatus {
    let Some(session) = session_id(req) else {
        return JobStatus::no_job();
    };
    let Some(job) = jobs.get(&session).await else {
        return JobStatus::no_job();
    };

    let status = match api.job_status(&job.id).await {
        Ok(Some(remote)) => JobStatus::new(remote),
        Ok(None) => JobStatus::blank(),
        Err(e) => {
            warn!("Status query for job {} failed: {}", job.id, e);
            JobStatus::error()
        }
    };

    if status != job.status {
        info!("Job {}: {} -> {}", job.id, job.status, status);
    }
    if !jobs.set_status(&session, &job.id, status.clone()).await {
        debug!("Job {} was replaced while polling; status not recorded", job.id);
    }
    status
}
