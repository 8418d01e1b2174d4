//! Static selector option lists.

use axum::extract::{Path, Query};
use axum::response::Response;
use serde::Deserialize;

use crate::selector::filter_options;
use crate::selector::options::OptionList;
use crate::web::error::ApiError;
use crate::web::routes::{cache, with_cache_control};

#[derive(Debug, Deserialize)]
pub struct OptionParams {
    #[serde(default)]
    pub q: String,
}

/// `GET /api/options/{list}?q={query}`
pub(super) async fn filter_list(
    Path(list): Path<String>,
    Query(params): Query<OptionParams>,
) -> Result<Response, ApiError> {
    let options = OptionList::from_slug(&list)
        .ok_or_else(|| ApiError::not_found(format!("Unknown option list '{list}'")))?;
    let matches = filter_options(&params.q, options.entries());
    Ok(with_cache_control(matches, cache::REFERENCE))
}
