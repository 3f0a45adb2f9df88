//! Per-session bookkeeping of remote parsing jobs.
//!
//! - `state`: the shared [`state::JobsState`] table, injected as `web::Data`.
//! - `session`: the cookie that ties a browser to its entry in that table.

pub mod session;
pub mod state;
