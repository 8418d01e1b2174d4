//! Request correlation for the refinancing API.
//!
//! The browser client and any fronting proxy may send `X-Request-Id`; a
//! usable value is kept so one id follows a Plaid or universities call
//! across hops. Anything else gets a fresh ULID. Every response carries the
//! id back, and each request is logged once inside a `request` span.

use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::Response;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};
use tracing::{Instrument, debug, error, info, warn};

pub static REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest inbound id accepted as-is.
const MAX_INBOUND_LEN: usize = 128;

/// The caller's id if present, printable and short enough, else a new ULID.
fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_INBOUND_LEN)
        .map_or_else(|| ulid::Ulid::new().to_string(), str::to_owned)
}

/// Log level rises with the status class.
fn log_response(method: &Method, path: &str, status: StatusCode, duration_ms: u64) {
    let status = status.as_u16();
    if status >= 500 {
        warn!(%method, path, status, duration_ms, "response");
    } else if status >= 400 {
        info!(%method, path, status, duration_ms, "response");
    } else {
        debug!(%method, path, status, duration_ms, "response");
    }
}

#[derive(Clone)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

#[derive(Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, B> Service<Request> for RequestIdService<S>
where
    S: Service<Request, Response = Response<B>> + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::fmt::Debug,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let request_id = resolve_request_id(req.headers());
        let header_value = HeaderValue::from_str(&request_id).ok();
        let span = tracing::info_span!("request", request_id = %request_id);

        let method = req.method().clone();
        let path = req.uri().path().to_owned();
        let start = Instant::now();
        let future = self.inner.call(req);

        Box::pin(
            async move {
                let mut result = future.await;
                let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &mut result {
                    Ok(response) => {
                        log_response(&method, &path, response.status(), duration_ms);
                        if let Some(value) = header_value {
                            response.headers_mut().insert(REQUEST_ID_HEADER, value);
                        }
                    }
                    Err(e) => {
                        error!(%method, path = %path, error = ?e, duration_ms, "request failed");
                    }
                }
                result
            }
            .instrument(span),
        )
    }
}
