//! Loan refinancing offers.

use axum::extract::Path;
use axum::response::Response;

use crate::offers::{self, LoanKind};
use crate::web::error::ApiError;
use crate::web::routes::{cache, with_cache_control};

/// `GET /api/loans`
pub(super) async fn list_loans() -> Response {
    with_cache_control(offers::loan_options(), cache::REFERENCE)
}

/// `GET /api/loans/{kind}`
pub(super) async fn get_loan(Path(kind): Path<String>) -> Result<Response, ApiError> {
    let kind: LoanKind = kind
        .parse()
        .map_err(|e: offers::UnknownLoanKind| ApiError::not_found(e.to_string()))?;
    Ok(with_cache_control(offers::loan_option(kind), cache::REFERENCE))
}
