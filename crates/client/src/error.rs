//! Error types for the Trading 212 client.

/// Result type for client operations.
pub type Trading212Result<T> = Result<T, Trading212Error>;

/// Error types that can occur when talking to the Trading 212 API.
#[derive(Debug, thiserror::Error)]
pub enum Trading212Error {
    /// The environment does not provide usable settings.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The API answered with a non-2xx status.
    #[error("Trading212 API error {status}: {body}")]
    Api { status: u16, body: String },

    /// A JSON success response could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Trading212Error {
    /// Create an API error from a status code and the raw response body.
    pub fn from_response(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// HTTP status of an upstream failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_keeps_raw_body() {
        let err = Trading212Error::from_response(404, r#"{"code":"NotFound"}"#);
        assert_eq!(
            err.to_string(),
            r#"Trading212 API error 404: {"code":"NotFound"}"#
        );
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_config_error_has_no_status() {
        let err = Trading212Error::Config("missing".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Configuration error: missing");
    }
}
