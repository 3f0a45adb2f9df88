//! Tracks the remote parsing job of every browser session.
//!
//! Each session owns at most one [`Job`]: a new upload replaces it, polls
//! overwrite its status. The table is bounded; when it is full the session
//! touched least recently is forgotten.

use common::jobs::{Job, JobStatus};
use std::{collections::HashMap, sync::Arc, time::Instant};
use tokio::sync::RwLock;

/// A job together with the last time its session used it.
#[derive(Debug, Clone)]
struct TrackedJob {
    job: Job,
    touched: Instant,
}

/// A thread-safe, shareable table of session jobs.
///
/// Created in `main.rs` and shared across the Actix application as
/// `web::Data`. The lock is never held across a remote call.
#[derive(Clone)]
pub struct JobsState {
    jobs: Arc<RwLock<HashMap<String, TrackedJob>>>,
    capacity: usize,
}

impl JobsState {
    pub fn new(capacity: usize) -> Self {
        JobsState {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Records `job` as the session's current job, replacing any previous one.
    pub async fn replace(&self, session: &str, job: Job) {
        let mut jobs = self.jobs.write().await;
        if !jobs.contains_key(session) && jobs.len() >= self.capacity {
            let oldest = jobs
                .iter()
                .min_by_key(|(_, tracked)| tracked.touched)
                .map(|(key, _)| key.clone());
            if let Some(evicted) = oldest.and_then(|key| jobs.remove(&key)) {
                log::info!("Forgetting job {} of an idle session", evicted.job.id);
            }
        }
        jobs.insert(
            session.to_string(),
            TrackedJob {
                job,
                touched: Instant::now(),
            },
        );
    }

    /// Returns a snapshot of the session's current job.
    pub async fn get(&self, session: &str) -> Option<Job> {
        let jobs = self.jobs.read().await;
        jobs.get(session).map(|tracked| tracked.job.clone())
    }

    /// Overwrites the status of the session's job if it is still `job_id`.
    ///
    /// Returns `false` when the job was replaced or forgotten meanwhile, in
    /// which case nothing is written.
    pub async fn set_status(&self, session: &str, job_id: &str, status: JobStatus) -> bool {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(session) {
            Some(tracked) if tracked.job.id == job_id => {
                tracked.job.status = status;
                tracked.touched = Instant::now();
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    async fn tracked_sessions(&self) -> usize {
        self.jobs.read().await.len()
    }
}
