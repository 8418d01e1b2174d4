//! Web API module for the refi service.

pub mod error;
pub mod loans;
pub mod middleware;
pub mod options;
pub mod plaid;
pub mod routes;
pub mod status;
pub mod universities;
pub mod university_cache;

pub use routes::*;
