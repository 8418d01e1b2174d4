//! TTL cache for upstream university searches, one entry per (name, country).
//!
//! Stores typed `Arc<Vec<UniversityRecord>>`, so reads never re-parse JSON.
//! Only successful upstream responses are inserted. Keys are caller-chosen
//! search text, so the map is bounded: a full cache sweeps expired entries on
//! insert and then, if still full, evicts the oldest entry.

use crate::universities::UniversityRecord;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::trace;

pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);
pub const DEFAULT_MAX_ENTRIES: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    name: String,
    country: Option<String>,
}

impl CacheKey {
    pub fn new(name: &str, country: Option<&str>) -> Self {
        Self {
            name: name.to_owned(),
            country: country.map(str::to_owned),
        }
    }
}

type Entry = (Instant, Arc<Vec<UniversityRecord>>);

#[derive(Clone)]
pub struct UniversityCache {
    entries: Arc<DashMap<CacheKey, Entry>>,
    ttl: Duration,
    max_entries: usize,
}

impl Default for UniversityCache {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }
}

impl UniversityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_limits(ttl, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_limits(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Return a cached entry if it exists and is fresh. Expired entries are evicted.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<Vec<UniversityRecord>>> {
        let fresh = {
            let entry = self.entries.get(key)?;
            let (cached_at, ref value) = *entry;
            (cached_at.elapsed() < self.ttl).then(|| value.clone())
        };
        if fresh.is_none() {
            self.entries.remove(key);
            trace!(name = %key.name, "university cache entry expired");
        }
        fresh
    }

    pub fn insert(
        &self,
        key: CacheKey,
        records: Vec<UniversityRecord>,
    ) -> Arc<Vec<UniversityRecord>> {
        let records = Arc::new(records);
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.make_room();
        }
        self.entries.insert(key, (Instant::now(), records.clone()));
        records
    }

    fn make_room(&self) {
        let before = self.entries.len();
        self.entries
            .retain(|_, (cached_at, _)| cached_at.elapsed() < self.ttl);
        let swept = before - self.entries.len();

        if self.entries.len() >= self.max_entries {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|entry| entry.value().0)
                .map(|entry| entry.key().clone());
            if let Some(key) = oldest {
                self.entries.remove(&key);
                trace!(name = %key.name, "university cache full, evicted oldest entry");
            }
        }
        if swept > 0 {
            trace!(swept, "swept expired university cache entries");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
