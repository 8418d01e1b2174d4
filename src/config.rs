//! Runtime configuration, merged from `refi.toml` and the environment.

use std::time::Duration;

use anyhow::Context;
use custom_debug_derive::Debug as CustomDebug;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use fundu::{DurationParser, TimeUnit};
use serde::{Deserialize, Deserializer};

use crate::plaid::PlaidEnvironment;
use crate::universities::DEFAULT_SEARCH_URL;

pub const CONFIG_FILE: &str = "refi.toml";

#[derive(CustomDebug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(
        default = "default_shutdown_timeout",
        deserialize_with = "deserialize_duration"
    )]
    pub shutdown_timeout: Duration,
    #[serde(default = "default_universities_url")]
    pub universities_url: String,
    #[serde(default)]
    pub plaid_client_id: Option<String>,
    #[serde(default)]
    #[debug(skip)]
    pub plaid_secret: Option<String>,
    #[serde(default)]
    pub plaid_env: PlaidEnvironment,
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_port() -> u16 {
    3000
}

fn default_shutdown_timeout() -> Duration {
    Duration::from_secs(8)
}

fn default_universities_url() -> String {
    DEFAULT_SEARCH_URL.to_owned()
}

impl Config {
    /// Load from `refi.toml` (if present) overlaid with environment variables.
    pub fn load() -> anyhow::Result<Self> {
        Self::figment().extract().context("Failed to load config")
    }

    pub fn figment() -> Figment {
        Figment::new()
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::raw())
    }

    /// Client id and secret, when both are configured and non-empty.
    pub fn plaid_credentials(&self) -> Option<(&str, &str)> {
        let id = self.plaid_client_id.as_deref().filter(|s| !s.is_empty())?;
        let secret = self.plaid_secret.as_deref().filter(|s| !s.is_empty())?;
        Some((id, secret))
    }
}

/// Accepts bare seconds (`8`) or a duration string (`8s`, `1500ms`, `2m`).
fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Seconds(secs) => Ok(Duration::from_secs(secs)),
        Raw::Text(text) => parse_duration(&text).map_err(serde::de::Error::custom),
    }
}

pub fn parse_duration(text: &str) -> anyhow::Result<Duration> {
    let parser =
        DurationParser::with_time_units(&[TimeUnit::MilliSecond, TimeUnit::Second, TimeUnit::Minute]);
    let parsed = parser
        .parse(text.trim())
        .with_context(|| format!("invalid duration '{text}'"))?;
    Duration::try_from(parsed).with_context(|| format!("duration '{text}' out of range"))
}
