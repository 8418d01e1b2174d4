//! Universities search proxy.

use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;
use tracing::{debug, error};

use crate::state::AppState;
use crate::web::error::{ApiError, ApiErrorCode};
use crate::web::routes::{cache, with_cache_control};
use crate::web::university_cache::CacheKey;

#[derive(Debug, Deserialize)]
pub struct UniversityParams {
    pub name: Option<String>,
    pub country: Option<String>,
}

/// `GET /api/universities?name={name}&country={country}`
///
/// Passes upstream records through unchanged.
pub(super) async fn search_universities(
    State(state): State<AppState>,
    Query(params): Query<UniversityParams>,
) -> Result<Response, ApiError> {
    let name = params
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            ApiError::new(
                ApiErrorCode::MissingParameter,
                "Query parameter 'name' is required",
            )
        })?;
    let country = params.country.as_deref().filter(|c| !c.is_empty());

    let key = CacheKey::new(name, country);
    if let Some(cached) = state.university_cache.get(&key) {
        debug!(query = name, country, count = cached.len(), "university cache hit");
        return Ok(with_cache_control(&*cached, cache::UNIVERSITIES));
    }

    let records = state
        .universities
        .search(name, country)
        .await
        .map_err(|e| {
            error!(error = ?e, query = name, country, "failed to fetch universities");
            ApiError::new(ApiErrorCode::UpstreamError, "Failed to fetch universities")
        })?;

    let records = state.university_cache.insert(key, records);
    Ok(with_cache_control(&*records, cache::UNIVERSITIES))
}
