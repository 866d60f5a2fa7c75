//! Configuration for the Trading 212 client.

use crate::error::{Trading212Error, Trading212Result};
use base64::Engine;
use std::time::Duration;
use url::Url;

/// Production API origin, used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://live.trading212.com";

pub const ENV_BASE_URL: &str = "T212_BASE_URL";
pub const ENV_AUTHORIZATION: &str = "T212_AUTHORIZATION";
pub const ENV_API_KEY: &str = "T212_API_KEY";
pub const ENV_API_SECRET: &str = "T212_API_SECRET";
pub const ENV_TIMEOUT_SECS: &str = "T212_TIMEOUT_SECS";

const MISSING_AUTH: &str =
    "Missing auth. Set T212_AUTHORIZATION, or both T212_API_KEY and T212_API_SECRET.";

/// Resolved client configuration. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Origin every request path is resolved against.
    pub base_url: Url,
    /// Value sent verbatim as the `Authorization` header.
    pub auth_header: String,
    /// Request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl Configuration {
    /// Create a configuration from an explicit base URL and header value.
    pub fn new(base_url: Url, auth_header: impl Into<String>) -> Self {
        Self {
            base_url,
            auth_header: auth_header.into(),
            timeout: None,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Trading212Result<Self> {
        Self::resolve(|name| std::env::var(name).ok())
    }

    /// Resolve the configuration from an arbitrary variable lookup.
    ///
    /// Whitespace-only values count as unset. An explicit authorization header
    /// wins over the key/secret pair.
    pub fn resolve<F>(lookup: F) -> Trading212Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let setting = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = setting(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url).map_err(|e| {
            Trading212Error::Config(format!("{} is not a valid URL: {}", ENV_BASE_URL, e))
        })?;

        let timeout = match setting(ENV_TIMEOUT_SECS) {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };

        let auth_header = match setting(ENV_AUTHORIZATION) {
            Some(header) => header,
            None => {
                let (Some(key), Some(secret)) = (setting(ENV_API_KEY), setting(ENV_API_SECRET))
                else {
                    return Err(Trading212Error::Config(MISSING_AUTH.to_string()));
                };
                basic_auth_header(&key, &secret)
            }
        };

        Ok(Self {
            base_url,
            auth_header,
            timeout,
        })
    }
}

/// Build a `Basic` header value from an API key and secret.
pub fn basic_auth_header(key: &str, secret: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", key, secret));
    format!("Basic {}", encoded)
}

fn parse_timeout(raw: &str) -> Trading212Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Trading212Error::Config(format!(
            "{} must be a positive number of seconds, got {:?}",
            ENV_TIMEOUT_SECS, raw
        ))),
    }
}
