//! Plaid Link endpoints: token issuance and public token exchange.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use ts_rs::TS;

use crate::json::parse_json_with_context;
use crate::plaid::{LinkToken, PlaidError};
use crate::state::AppState;
use crate::web::error::{ApiError, ApiErrorCode};

const NOT_CONFIGURED: &str = "Plaid credentials not configured. Set PLAID_CLIENT_ID and PLAID_SECRET in the environment or .env file.";
const LINK_TOKEN_FAILED: &str = "Failed to create link token";
const EXCHANGE_FAILED: &str = "Plaid API error";

#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateLinkTokenRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct ExchangePublicTokenRequest {
    pub public_token: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct ExchangePublicTokenResponse {
    pub public_exchange: String,
}

/// The caller's user id, or a timestamp-derived one when absent or blank.
fn client_user_id(requested: Option<String>) -> String {
    requested
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| format!("user_{}", chrono::Utc::now().timestamp_millis()))
}

fn body_text(body: &[u8]) -> Result<&str, String> {
    std::str::from_utf8(body).map_err(|e| format!("request body is not valid UTF-8: {e}"))
}

fn link_token_error(error: &PlaidError) -> ApiError {
    let status = error
        .status()
        .and_then(|s| StatusCode::from_u16(s).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let details = match error {
        PlaidError::Api { error, .. } => error.error_message.clone(),
        other => other.to_string(),
    };
    ApiError::new(ApiErrorCode::UpstreamError, LINK_TOKEN_FAILED)
        .with_status(status)
        .with_upstream_code(error.code().unwrap_or("UNKNOWN_ERROR"))
        .with_details(details)
}

/// `POST /api/create_link_token`
pub(super) async fn create_link_token(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LinkToken>, ApiError> {
    let Some(plaid) = state.plaid.as_ref() else {
        warn!("link token requested but Plaid is not configured");
        return Err(ApiError::new(ApiErrorCode::NotConfigured, NOT_CONFIGURED));
    };

    let request = if body.iter().all(u8::is_ascii_whitespace) {
        CreateLinkTokenRequest::default()
    } else {
        let text = body_text(&body).map_err(|details| {
            ApiError::new(ApiErrorCode::InvalidBody, LINK_TOKEN_FAILED).with_details(details)
        })?;
        parse_json_with_context::<CreateLinkTokenRequest>(text).map_err(|e| {
            ApiError::new(ApiErrorCode::InvalidBody, LINK_TOKEN_FAILED).with_details(e.to_string())
        })?
    };

    let user_id = client_user_id(request.user_id);
    match plaid.create_link_token(&user_id).await {
        Ok(token) => {
            info!(request_id = %token.request_id, "link token created");
            Ok(Json(token))
        }
        Err(e) => {
            error!(error = ?e, "failed to create link token");
            Err(link_token_error(&e))
        }
    }
}

/// `POST /api/exchange_public_token`
///
/// The access token is dropped after the exchange; only the item id is logged.
pub(super) async fn exchange_public_token(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ExchangePublicTokenResponse>, ApiError> {
    let failed = || ApiError::new(ApiErrorCode::UpstreamError, EXCHANGE_FAILED);

    let Some(plaid) = state.plaid.as_ref() else {
        warn!("public token exchange requested but Plaid is not configured");
        return Err(failed());
    };

    let text = body_text(&body).map_err(|details| {
        error!(%details, "invalid public token exchange body");
        failed()
    })?;
    let request: ExchangePublicTokenRequest = parse_json_with_context(text).map_err(|e| {
        error!(error = ?e, "invalid public token exchange body");
        failed()
    })?;

    let exchange = plaid
        .exchange_public_token(&request.public_token)
        .await
        .map_err(|e| {
            error!(error = ?e, "public token exchange failed");
            failed()
        })?;

    info!(item_id = %exchange.item_id, "public token exchanged");
    Ok(Json(ExchangePublicTokenResponse {
        public_exchange: "complete".to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plaid::PlaidApiError;

    #[test]
    fn blank_user_id_gets_generated() {
        assert_eq!(client_user_id(Some("user-7".into())), "user-7");
        assert!(client_user_id(Some(String::new())).starts_with("user_"));
        let generated = client_user_id(None);
        let millis = generated.trim_start_matches("user_");
        assert!(millis.parse::<i64>().is_ok(), "{generated}");
    }

    #[test]
    fn non_utf8_body_names_the_encoding() {
        assert_eq!(body_text(b"{}"), Ok("{}"));
        let details = body_text(b"{\"userId\":\"\xff\"}").unwrap_err();
        assert!(details.starts_with("request body is not valid UTF-8"), "{details}");
    }

    #[test]
    fn plaid_errors_keep_upstream_status_and_code() {
        let error = PlaidError::Api {
            status: 400,
            error: PlaidApiError {
                error_type: "INVALID_INPUT".into(),
                error_code: "INVALID_API_KEYS".into(),
                error_message: "invalid client_id or secret provided".into(),
                display_message: None,
                request_id: None,
            },
        };
        let response = axum::response::IntoResponse::into_response(link_token_error(&error));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn statusless_errors_map_to_500() {
        let error = PlaidError::Malformed {
            source: anyhow::anyhow!("bad json"),
        };
        let response = axum::response::IntoResponse::into_response(link_token_error(&error));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
