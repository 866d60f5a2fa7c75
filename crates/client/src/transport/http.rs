//! HTTP transport layer for the Trading 212 client.

use crate::config::Configuration;
use crate::error::{Trading212Error, Trading212Result};
use crate::payload::Payload;
use crate::query::Query;
use reqwest::{header, Client};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP transport for making API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<Configuration>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<Configuration>) -> Trading212Result<Self> {
        let mut headers = header::HeaderMap::new();

        let mut auth = header::HeaderValue::from_str(&config.auth_header).map_err(|_| {
            Trading212Error::Config("Invalid authorization header value".to_string())
        })?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static(JSON_CONTENT_TYPE),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Build a URL for the given path and query.
    fn build_url(&self, path: &str, query: Option<&Query>) -> Trading212Result<Url> {
        let mut url = self.config.base_url.join(path)?;

        if let Some(query) = query {
            let pairs = query.pairs();
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(pairs);
            }
        }

        Ok(url)
    }

    /// Execute a GET request and interpret the body by content type.
    ///
    /// A non-2xx status is an error whatever the body looks like.
    pub async fn get(&self, path: &str, query: Option<&Query>) -> Trading212Result<Payload> {
        let url = self.build_url(path, query)?;
        debug!(url = %url, "GET request");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .unwrap_or_default();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), path = path, "Upstream request failed");
            return Err(Trading212Error::from_response(status.as_u16(), body));
        }

        interpret_body(&content_type, body)
    }
}

fn interpret_body(content_type: &str, body: String) -> Trading212Result<Payload> {
    if !content_type.contains(JSON_CONTENT_TYPE) {
        return Ok(Payload::Text(body));
    }
    if body.is_empty() {
        return Ok(Payload::Empty);
    }
    Ok(Payload::Json(serde_json::from_str(&body)?))
}
