use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;

/// Cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "relay_session";

/// Session token sent by the caller, if any.
pub fn session_id(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Builds the session cookie.
///
/// Cross-site browser use needs `SameSite=None`, which browsers only accept
/// together with `Secure`; plain-HTTP deployments get `SameSite=Lax`.
pub fn session_cookie(id: &str, secure: bool) -> Cookie<'static> {
    let same_site = if secure { SameSite::None } else { SameSite::Lax };
    Cookie::build(SESSION_COOKIE, id.to_string())
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(same_site)
        .finish()
}
