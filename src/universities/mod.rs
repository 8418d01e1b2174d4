//! Client for the hipolabs universities search API.
//!
//! The same client works against this service's own `/api/universities`
//! proxy, which passes records through unchanged.

pub mod errors;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::json::parse_json_with_context;
use crate::utils::{fmt_duration, log_if_slow};

pub use errors::LookupError;

/// Public hipolabs endpoint.
pub const DEFAULT_SEARCH_URL: &str = "http://universities.hipolabs.com/search";

const SLOW_SEARCH: Duration = Duration::from_secs(2);

/// One university as returned by the search endpoint.
///
/// Every field is optional on ingress; records without a usable `name` are
/// dropped later by the lookup layer, not rejected here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UniversityRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub alpha_two_code: Option<String>,
    #[serde(default, rename = "state-province")]
    pub state_province: Option<String>,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub web_pages: Vec<String>,
}

impl UniversityRecord {
    /// The display name, if present and non-blank.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }
}

/// Anything that can answer a university name search.
#[async_trait]
pub trait UniversitySource: Send + Sync {
    async fn search(
        &self,
        name: &str,
        country: Option<&str>,
    ) -> Result<Vec<UniversityRecord>, LookupError>;
}

/// HTTP client for a universities search endpoint.
pub struct UniversitiesApi {
    http: reqwest::Client,
    search_url: String,
}

impl UniversitiesApi {
    pub fn new(search_url: impl Into<String>) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("refi/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            search_url: search_url.into(),
        })
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

#[async_trait]
impl UniversitySource for UniversitiesApi {
    async fn search(
        &self,
        name: &str,
        country: Option<&str>,
    ) -> Result<Vec<UniversityRecord>, LookupError> {
        let start = Instant::now();

        let mut request = self.http.get(&self.search_url).query(&[("name", name)]);
        if let Some(country) = country {
            request = request.query(&[("country", country)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                query = name,
                country,
                "universities search failed"
            );
            return Err(LookupError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let records: Vec<UniversityRecord> = parse_json_with_context(&body)
            .map_err(|source| LookupError::Malformed { source })?;

        log_if_slow(start, SLOW_SEARCH, "universities search");
        debug!(
            query = name,
            country,
            count = records.len(),
            duration = fmt_duration(start.elapsed()),
            "universities search completed"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_tolerates_missing_fields() {
        let records: Vec<UniversityRecord> =
            parse_json_with_context(r#"[{"name": "Stanford University"}, {}]"#).unwrap();
        assert_eq!(records[0].display_name(), Some("Stanford University"));
        assert!(records[1].display_name().is_none());
        assert!(records[1].domains.is_empty());
    }

    #[test]
    fn record_reads_hyphenated_state_field() {
        let records: Vec<UniversityRecord> = parse_json_with_context(
            r#"[{"name": "Texas State University", "state-province": "Texas",
                 "alpha_two_code": "US", "country": "United States",
                 "domains": ["txstate.edu"], "web_pages": ["https://www.txstate.edu/"]}]"#,
        )
        .unwrap();
        assert_eq!(records[0].state_province.as_deref(), Some("Texas"));
        assert_eq!(records[0].web_pages, vec!["https://www.txstate.edu/"]);
    }

    #[test]
    fn blank_name_is_not_displayable() {
        let record = UniversityRecord {
            name: Some("   ".to_owned()),
            ..Default::default()
        };
        assert!(record.display_name().is_none());
    }

    #[test]
    fn null_state_serializes_with_original_key() {
        let json = serde_json::to_value(UniversityRecord::default()).unwrap();
        assert!(json.get("state-province").is_some());
    }
}
