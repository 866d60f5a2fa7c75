use crate::session::SessionStore;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use t212_mcp::McpServer;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Route that opens an event stream
    #[serde(default = "default_sse_path")]
    pub sse_path: String,

    /// Route that accepts client messages for a session
    #[serde(default = "default_message_path")]
    pub message_path: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3333
}

fn default_sse_path() -> String {
    "/sse".to_string()
}

fn default_message_path() -> String {
    "/message".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            sse_path: default_sse_path(),
            message_path: default_message_path(),
        }
    }
}

impl ServerConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        let config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .context("Failed to read configuration file")?;
            toml::from_str(&content).context("Failed to parse configuration file")?
        } else {
            tracing::info!("Configuration file not found, using defaults");
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("sse_path", &self.http.sse_path),
            ("message_path", &self.http.message_path),
        ] {
            if !path.starts_with('/') {
                bail!("http.{} must start with '/', got {:?}", name, path);
            }
        }
        if self.http.sse_path == self.http.message_path {
            bail!("http.sse_path and http.message_path must differ");
        }
        Ok(())
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http.host, self.http.port)
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub mcp: Arc<McpServer>,
    pub sessions: SessionStore,
    pub message_path: String,
}

impl AppState {
    pub fn new(config: &ServerConfig, mcp: Arc<McpServer>) -> Self {
        Self {
            mcp,
            sessions: SessionStore::default(),
            message_path: config.http.message_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::load(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:3333");
        assert_eq!(config.http.sse_path, "/sse");
        assert_eq!(config.http.message_path, "/message");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http]\nport = 8080\nhost = \"0.0.0.0\"").unwrap();

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.http.sse_path, "/sse");
    }

    #[test]
    fn test_invalid_paths_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http]\nsse_path = \"events\"").unwrap();
        assert!(ServerConfig::load(file.path()).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http]\nsse_path = \"/x\"\nmessage_path = \"/x\"").unwrap();
        assert!(ServerConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http\nport = ").unwrap();
        assert!(ServerConfig::load(file.path()).is_err());
    }
}
