//! Client configuration.

use std::fmt;
use std::time::Duration;

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors raised while validating a [`ClientConfig`] or building a client
/// from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("endpoint must not be empty")]
    EmptyEndpoint,

    #[error("endpoint must start with http:// or https://, got {0}")]
    InvalidEndpointScheme(String),

    #[error("token must not be empty")]
    EmptyToken,

    #[error("unable to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// An auth token that is redacted in `Debug` output but still round-trips
/// through serde.
#[derive(Clone)]
pub struct SecretToken(Secret<String>);

impl SecretToken {
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for SecretToken {
    fn from(value: String) -> Self {
        Self(Secret::new(value))
    }
}

impl From<&str> for SecretToken {
    fn from(value: &str) -> Self {
        Self(Secret::new(value.to_string()))
    }
}

impl Serialize for SecretToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.expose_secret())
    }
}

impl<'de> Deserialize<'de> for SecretToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Ok(Self(Secret::new(token)))
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Settings for one MKS endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClientConfig {
    /// Base URL of the v1 API, e.g. `https://ru-1.mks.selcloud.ru/v1`.
    pub endpoint: String,
    /// Sent as `X-Auth-Token` on every request.
    pub token: SecretToken,
    /// Overrides the default `User-Agent`.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Whole-request timeout applied by the HTTP client. Per-call deadlines
    /// come from `RequestContext` and are enforced on top of this.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>, token: impl Into<SecretToken>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            user_agent: None,
            timeout_secs: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpointScheme(self.endpoint.clone()));
        }
        if self.token.expose().is_empty() {
            return Err(ConfigError::EmptyToken);
        }

        Ok(())
    }
}
