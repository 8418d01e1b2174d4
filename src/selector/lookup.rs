//! Remote lookups that resolve a query to display strings.
//!
//! A lookup never fails from the caller's point of view: transport errors,
//! bad statuses and malformed payloads all collapse to an empty result set
//! after being logged.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::universities::{LookupError, UniversityRecord, UniversitySource};

/// Queries shorter than this (in characters) never reach the network.
pub const MIN_QUERY_CHARS: usize = 2;

/// Upper bound on entries returned by one lookup.
pub const MAX_RESULTS: usize = 50;

/// A source of suggestions backed by an external service.
#[async_trait]
pub trait RemoteLookup: Send + Sync {
    /// Resolve `query` to an ordered list of display strings, possibly empty.
    async fn search(&self, query: &str) -> Vec<String>;
}

/// Whether `query` is long enough to be worth a remote lookup.
pub fn meets_min_length(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_CHARS
}

/// University name lookup with an optional country narrowing.
///
/// When a narrowed search comes back empty or unreadable, the same query is
/// issued once more without the country before giving up.
pub struct UniversityLookup {
    source: Arc<dyn UniversitySource>,
    country: Option<String>,
}

impl UniversityLookup {
    pub fn new(source: Arc<dyn UniversitySource>) -> Self {
        Self {
            source,
            country: None,
        }
    }

    /// Narrow searches to one country, widening on an empty answer.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    async fn fetch(&self, query: &str) -> Result<Vec<UniversityRecord>, LookupError> {
        let Some(country) = self.country.as_deref() else {
            return self.source.search(query, None).await;
        };

        match self.source.search(query, Some(country)).await {
            Ok(records) if !records.is_empty() => Ok(records),
            Ok(_) => {
                debug!(query, country, "no narrowed results, retrying without country");
                self.source.search(query, None).await
            }
            Err(e) if e.is_malformed() => {
                warn!(query, country, error = %e, "malformed narrowed response, retrying without country");
                self.source.search(query, None).await
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl RemoteLookup for UniversityLookup {
    async fn search(&self, query: &str) -> Vec<String> {
        if !meets_min_length(query) {
            return Vec::new();
        }

        match self.fetch(query).await {
            Ok(records) => {
                let names = display_names(records);
                debug!(query, count = names.len(), "university lookup resolved");
                names
            }
            Err(e) => {
                warn!(query, error = %e, "university lookup failed");
                Vec::new()
            }
        }
    }
}

/// Keep non-empty names in upstream order, capped at [`MAX_RESULTS`].
fn display_names(records: Vec<UniversityRecord>) -> Vec<String> {
    records
        .into_iter()
        .filter_map(|record| record.display_name().map(str::to_owned))
        .take(MAX_RESULTS)
        .collect()
}
