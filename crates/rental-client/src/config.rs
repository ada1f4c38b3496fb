//! Client configuration

use std::time::Duration;

use url::Url;

use crate::error::ClientError;

pub const API_URL_ENV: &str = "RENTAL_API_URL";
pub const API_TOKEN_ENV: &str = "RENTAL_API_TOKEN";
pub const API_TIMEOUT_ENV: &str = "RENTAL_API_TIMEOUT_MS";

pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root of the REST API; endpoint paths are appended to it
    pub base_url: Url,
    pub timeout: Duration,
    /// Bearer token for an already signed-in user
    pub token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            token: None,
        })
    }

    /// Read `RENTAL_API_URL`, `RENTAL_API_TIMEOUT_MS` and `RENTAL_API_TOKEN`,
    /// using defaults for the ones that are unset
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let base_url = lookup(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut config = Self::new(&base_url)?;

        if let Some(raw) = lookup(API_TIMEOUT_ENV) {
            let ms = raw.trim().parse::<u64>().map_err(|_| {
                ClientError::Config(format!("{API_TIMEOUT_ENV} must be milliseconds, got '{raw}'"))
            })?;
            config = config.with_timeout_ms(ms);
        }

        config.token = lookup(API_TOKEN_ENV).filter(|t| !t.trim().is_empty());
        Ok(config)
    }

    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.timeout = Duration::from_millis(ms);
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Parse an API root; it must be able to carry path segments
pub fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(ClientError::Config(format!(
            "API URL cannot carry a path: {raw}"
        )));
    }
    Ok(url)
}
