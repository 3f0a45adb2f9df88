use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a remote parsing job.
///
/// The remote API owns the vocabulary (`PENDING`, `SUCCESS`, `ERROR`, ...), so the
/// value is kept verbatim, casing included, and only compared case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobStatus(String);

impl JobStatus {
    /// Reported when no job is tracked for the caller.
    pub const NO_JOB: &'static str = "no job";
    pub const PENDING: &'static str = "pending";
    /// Recorded when the remote status query fails.
    pub const ERROR: &'static str = "error";
    /// Recorded when the remote answers without a `status` field.
    pub const BLANK: &'static str = "blank";

    pub fn new(value: impl Into<String>) -> Self {
        JobStatus(value.into())
    }

    pub fn no_job() -> Self {
        JobStatus::new(Self::NO_JOB)
    }

    pub fn pending() -> Self {
        JobStatus::new(Self::PENDING)
    }

    pub fn error() -> Self {
        JobStatus::new(Self::ERROR)
    }

    pub fn blank() -> Self {
        JobStatus::new(Self::BLANK)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True once the result can be downloaded (`success` or `completed`, any case).
    pub fn is_complete(&self) -> bool {
        self.0.eq_ignore_ascii_case("success") || self.0.eq_ignore_ascii_case("completed")
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        JobStatus::pending()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobStatus {
    fn from(value: &str) -> Self {
        JobStatus::new(value)
    }
}

/// A job submitted to the remote parsing API on behalf of one session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    /// Name the client uploaded the document under; the result is named after it.
    pub original_file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_is_case_insensitive() {
        assert!(JobStatus::new("SUCCESS").is_complete());
        assert!(JobStatus::new("success").is_complete());
        assert!(JobStatus::new("Completed").is_complete());
        assert!(!JobStatus::new("PENDING").is_complete());
        assert!(!JobStatus::error().is_complete());
        assert!(!JobStatus::no_job().is_complete());
    }

    #[test]
    fn default_is_pending() {
        assert_eq!(JobStatus::default().as_str(), "pending");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&JobStatus::new("SUCCESS")).unwrap();
        assert_eq!(json, "\"SUCCESS\"");
    }
}
