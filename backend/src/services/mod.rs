//! HTTP surface of the relay.
//!
//! - `parsing`: `/upload`, `/poll` and `/download`.
//! - `static_files`: the embedded upload page served at `/`.

use crate::config::RelayConfig;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::web::ServiceConfig;

pub mod parsing;
pub mod static_files;

/// Registers every route. The application must provide `web::Data` for
/// `JobsState`, `dyn ParsingApi` and `RelayConfig`.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.configure(parsing::configure_routes)
        .configure(static_files::configure_routes);
}

/// Browser access policy: only the configured origins, with credentials so the
/// session cookie travels on cross-origin calls.
pub fn cors_policy(config: &RelayConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_header(header::CONTENT_TYPE)
        .supports_credentials()
        .max_age(3600);
    for origin in &config.allowed_origins {
        cors = if origin == "*" {
            cors.allow_any_origin()
        } else {
            cors.allowed_origin(origin)
        };
    }
    cors
}
