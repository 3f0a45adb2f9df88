//! Serves the upload page and its assets, embedded into the binary at build time.

use actix_web::http::header::ContentType;
use actix_web::web::{self, get, ServiceConfig};
use actix_web::HttpResponse;
use include_dir::{include_dir, Dir};

static PAGE_ASSETS: Dir = include_dir!("$CARGO_MANIFEST_DIR/static");

const INDEX_PAGE: &str = "index.html";

/// Registers `GET /` and `GET /<asset>`. Must come after the API routes.
pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.route("/", get().to(index_page))
        .route("/{asset:.+}", get().to(page_asset));
}

async fn index_page() -> HttpResponse {
    asset_response(INDEX_PAGE).unwrap_or_else(not_found)
}

async fn page_asset(asset: web::Path<String>) -> HttpResponse {
    asset_response(&asset).unwrap_or_else(not_found)
}

/// The embedded file at `path`, typed from its extension.
fn asset_response(path: &str) -> Option<HttpResponse> {
    let asset = PAGE_ASSETS.get_file(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Some(
        HttpResponse::Ok()
            .insert_header(ContentType(mime))
            .body(asset.contents()),
    )
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_page_is_embedded() {
        assert!(asset_response(INDEX_PAGE).is_some());
        assert!(asset_response("missing.js").is_none());
        assert!(asset_response("../Cargo.toml").is_none());
    }
}
