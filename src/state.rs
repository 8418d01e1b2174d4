//! Application state shared across web handlers.

use crate::plaid::PlaidClient;
use crate::universities::UniversitySource;
use crate::web::university_cache::UniversityCache;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub universities: Arc<dyn UniversitySource>,
    pub university_cache: UniversityCache,
    /// `None` when Plaid credentials are not configured.
    pub plaid: Option<Arc<PlaidClient>>,
}

impl AppState {
    pub fn new(universities: Arc<dyn UniversitySource>, plaid: Option<Arc<PlaidClient>>) -> Self {
        Self {
            universities,
            university_cache: UniversityCache::new(),
            plaid,
        }
    }
}
