use crate::config::ALLOWED_ORIGINS;
use actix_cors::Cors;

/// Cross-origin policy for the local frontend: fixed origins, credentials
/// allowed, any method and header.
pub fn cors() -> Cors {
    ALLOWED_ORIGINS
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}
