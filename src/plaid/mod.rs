//! Minimal Plaid API client: link token issuance and public token exchange.

pub mod errors;

use chrono::{DateTime, Utc};
use custom_debug_derive::Debug as CustomDebug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::json::parse_json_with_context;

pub use errors::{PlaidApiError, PlaidError};

/// Name shown to the user inside the Link widget.
pub const CLIENT_NAME: &str = "Loan Refinancing App";

const PRODUCTS: &[&str] = &["auth"];
const COUNTRY_CODES: &[&str] = &["US"];
const LANGUAGE: &str = "en";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum PlaidEnvironment {
    #[default]
    Sandbox,
    Development,
    Production,
}

impl From<String> for PlaidEnvironment {
    /// Unrecognized names fall back to the sandbox.
    fn from(name: String) -> Self {
        match name.to_lowercase().as_str() {
            "production" => Self::Production,
            "development" => Self::Development,
            _ => Self::Sandbox,
        }
    }
}

impl PlaidEnvironment {
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://sandbox.plaid.com",
            Self::Development => "https://development.plaid.com",
            Self::Production => "https://production.plaid.com",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// A freshly issued Link token.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LinkToken {
    pub link_token: String,
    pub expiration: DateTime<Utc>,
    pub request_id: String,
}

/// Result of exchanging a public token. The access token is a live credential.
#[derive(CustomDebug, Clone, Deserialize)]
pub struct PublicTokenExchange {
    #[debug(skip)]
    pub access_token: String,
    pub item_id: String,
    pub request_id: String,
}

#[derive(Serialize)]
struct LinkTokenCreateRequest<'a> {
    user: LinkTokenUser<'a>,
    client_name: &'a str,
    products: &'a [&'a str],
    country_codes: &'a [&'a str],
    language: &'a str,
}

#[derive(Serialize)]
struct LinkTokenUser<'a> {
    client_user_id: &'a str,
}

#[derive(Serialize)]
struct PublicTokenExchangeRequest<'a> {
    public_token: &'a str,
}

#[derive(CustomDebug)]
pub struct PlaidClient {
    #[debug(skip)]
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    #[debug(skip)]
    secret: String,
}

impl PlaidClient {
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, PlaidError> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            client_id: client_id.into(),
            secret: secret.into(),
        })
    }

    pub fn for_environment(
        environment: PlaidEnvironment,
        client_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, PlaidError> {
        Self::new(environment.base_url(), client_id, secret)
    }

    /// `POST /link/token/create` for the given end user.
    pub async fn create_link_token(&self, client_user_id: &str) -> Result<LinkToken, PlaidError> {
        let request = LinkTokenCreateRequest {
            user: LinkTokenUser { client_user_id },
            client_name: CLIENT_NAME,
            products: PRODUCTS,
            country_codes: COUNTRY_CODES,
            language: LANGUAGE,
        };
        self.post("/link/token/create", &request).await
    }

    /// `POST /item/public_token/exchange`.
    pub async fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> Result<PublicTokenExchange, PlaidError> {
        self.post(
            "/item/public_token/exchange",
            &PublicTokenExchangeRequest { public_token },
        )
        .await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, PlaidError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("PLAID-CLIENT-ID", &self.client_id)
            .header("PLAID-SECRET", &self.secret)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(path, status = status.as_u16(), "Plaid response");

        if !status.is_success() {
            return Err(match serde_json::from_str::<PlaidApiError>(&text) {
                Ok(error) => PlaidError::Api {
                    status: status.as_u16(),
                    error,
                },
                Err(_) => PlaidError::Status {
                    status: status.as_u16(),
                },
            });
        }

        parse_json_with_context(&text).map_err(|source| PlaidError::Malformed { source })
    }
}
