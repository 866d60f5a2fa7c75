//! Main client for the Trading 212 API.

use crate::config::Configuration;
use crate::error::Trading212Result;
use crate::payload::Payload;
use crate::query::Query;
use crate::transport::HttpTransport;
use std::sync::Arc;

/// Read access to the Trading 212 API.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait::async_trait]
pub trait Trading212Api: Send + Sync {
    /// GET `path` (resolved against the base URL) with optional query parameters.
    async fn get(&self, path: &str, query: Option<&Query>) -> Trading212Result<Payload>;
}

/// Client for the Trading 212 API. Cheap to clone and safe to share.
#[derive(Debug, Clone)]
pub struct Trading212Client {
    config: Arc<Configuration>,
    http: HttpTransport,
}

impl Trading212Client {
    /// Create a client from a resolved configuration.
    pub fn new(config: Configuration) -> Trading212Result<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Create a client configured from the process environment.
    pub fn from_env() -> Trading212Result<Self> {
        Self::new(Configuration::from_env()?)
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &Configuration {
        &self.config
    }
}

#[async_trait::async_trait]
impl Trading212Api for Trading212Client {
    async fn get(&self, path: &str, query: Option<&Query>) -> Trading212Result<Payload> {
        self.http.get(path, query).await
    }
}
