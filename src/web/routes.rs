//! Web API router construction and shared response utilities.

use axum::{
    Router,
    http::HeaderValue,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};

use std::time::Duration;

use crate::state::AppState;
use crate::web::middleware::request_id::RequestIdLayer;
use crate::web::{loans, options, plaid, status, universities};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer};

/// Cache-Control presets for public endpoints.
pub mod cache {
    /// Static option lists and loan offers.
    pub const REFERENCE: &str = "public, max-age=300, stale-while-revalidate=300";
    /// Proxied university search results.
    pub const UNIVERSITIES: &str = "public, max-age=600";
}

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Wraps a JSON response with a `Cache-Control` header.
pub fn with_cache_control<T: serde::Serialize>(value: T, header: &'static str) -> Response {
    let mut response = Json(value).into_response();
    response.headers_mut().insert(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(header),
    );
    response
}

/// Creates the web server router
pub fn create_router(app_state: AppState) -> Router {
    let api_router = Router::new()
        .route("/health", get(status::health))
        .route("/universities", get(universities::search_universities))
        .route("/options/{list}", get(options::filter_list))
        .route("/create_link_token", post(plaid::create_link_token))
        .route("/exchange_public_token", post(plaid::exchange_public_token))
        .route("/loans", get(loans::list_loans))
        .route("/loans/{kind}", get(loans::get_loan))
        .with_state(app_state);

    Router::new().nest("/api", api_router).layer((
        // Outermost: per-request ID span + severity-proportional response logging.
        RequestIdLayer,
        CompressionLayer::new()
            .zstd(true)
            .br(true)
            .gzip(true)
            .quality(tower_http::CompressionLevel::Fastest),
        TimeoutLayer::new(REQUEST_TIMEOUT),
    ))
}
