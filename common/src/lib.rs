pub mod jobs;
pub mod responses;
