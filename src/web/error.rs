//! JSON error responses for API handlers.

use std::borrow::Cow;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use ts_rs::TS;

/// Machine-readable error codes returned in the `code` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ApiErrorCode {
    MissingParameter,
    InvalidBody,
    NotFound,
    UpstreamError,
    NotConfigured,
}

impl ApiErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingParameter => "MISSING_PARAMETER",
            Self::InvalidBody => "INVALID_BODY",
            Self::NotFound => "NOT_FOUND",
            Self::UpstreamError => "UPSTREAM_ERROR",
            Self::NotConfigured => "NOT_CONFIGURED",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            Self::MissingParameter | Self::InvalidBody => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::UpstreamError | Self::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error returned by API handlers, rendered as `{error, code, details?}`.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    code: Cow<'static, str>,
    message: Cow<'static, str>,
    details: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl ApiError {
    pub fn new(code: ApiErrorCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status: code.status(),
            code: Cow::Borrowed(code.as_str()),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ApiErrorCode::NotFound, message)
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Replace the code with one reported by an upstream service.
    pub fn with_upstream_code(mut self, code: impl Into<String>) -> Self {
        self.code = Cow::Owned(code.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: &self.message,
            code: &self.code,
            details: self.details.as_deref(),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn renders_message_and_code() {
        let (status, json) = body_json(ApiError::new(
            ApiErrorCode::MissingParameter,
            "Query parameter 'name' is required",
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Query parameter 'name' is required");
        assert_eq!(json["code"], "MISSING_PARAMETER");
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn upstream_status_and_code_override_defaults() {
        let error = ApiError::new(ApiErrorCode::UpstreamError, "Failed to create link token")
            .with_status(StatusCode::BAD_REQUEST)
            .with_upstream_code("INVALID_API_KEYS")
            .with_details("invalid client_id or secret provided");
        let (status, json) = body_json(error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "INVALID_API_KEYS");
        assert_eq!(json["details"], "invalid client_id or secret provided");
    }

    #[test]
    fn code_strings_match_serde_names() {
        for code in [
            ApiErrorCode::MissingParameter,
            ApiErrorCode::NotFound,
            ApiErrorCode::NotConfigured,
        ] {
            assert_eq!(serde_json::to_value(code).unwrap(), code.as_str());
        }
    }
}
