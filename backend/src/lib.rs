//! Relay between a browser and a remote document-parsing service.
//!
//! A document uploaded to `/upload` is forwarded to the remote API, the
//! resulting job is tracked per browser session, `/poll` refreshes its status,
//! and `/download` returns the parsed text once the job has finished.

pub mod config;
pub mod error;
pub mod job_controller;
pub mod parsing_api;
pub mod services;
