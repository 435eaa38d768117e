//! JSON/HTTP service.
//!
//! This module provides:
//! - The axum router and its handlers (`routes`)
//! - Validated request extraction (`extract`)
//! - Error-to-status mapping (`error`)
//! - Configuration types (`config`)
//! - The OpenAPI document behind `/docs` (`openapi`)

pub mod config;
pub mod error;
pub mod extract;
pub mod openapi;
pub mod routes;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{IrisError, Result};

pub use config::Config;
pub use error::{ApiError, ErrorBody};
pub use extract::ValidatedJson;
pub use openapi::ApiDoc;
pub use routes::AppState;

/// Interactive API documentation.
pub const DOCS_PATH: &str = "/docs";

/// OpenAPI document rendered by the documentation page.
pub const OPENAPI_PATH: &str = "/openapi.json";

/// Build the router for the four endpoints plus the documentation pages,
/// with request tracing.
///
/// CORS is left to the caller (see [`cors_layer`]).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/predict", post(routes::predict))
        .route("/predict/batch", post(routes::predict_batch))
        .with_state(state)
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

/// CORS layer for the configured origins.
///
/// An origin list containing `*` allows everything; otherwise only the
/// listed origins are allowed, with any method and header.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    if origins.iter().any(|origin| origin == "*") {
        return Ok(CorsLayer::permissive());
    }
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                IrisError::Configuration(format!("Invalid CORS origin {origin:?}: {e}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}
