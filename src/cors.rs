//! Cross-origin policy
//!
//! Only a fixed allow-list of origins, the methods actually served and the
//! `Content-Type`/`Authorization` headers are allowed. Enforced at the
//! boundary, handlers never look at origins.

use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderValue;
use axum::http::Method;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;

use crate::utils::env_var_or_else;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173";

/// Create the CORS layer
///
/// Origins come from the comma separated `ALLOWED_ORIGINS` environment
/// variable, an unparseable origin is fatal
pub fn layer() -> CorsLayer {
    let origins = env_var_or_else("ALLOWED_ORIGINS", || String::from(DEFAULT_ALLOWED_ORIGINS));

    let origins = origins
        .split(',')
        .map(|origin| origin.trim().parse::<HeaderValue>().expect("Valid origin"))
        .collect::<Vec<HeaderValue>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}
