//! # Trading 212 client
//!
//! Read-only client for the Trading 212 REST API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use t212_client::{Query, Trading212Api, Trading212Client, Trading212Result};
//!
//! #[tokio::main]
//! async fn main() -> Trading212Result<()> {
//!     // Reads T212_BASE_URL, T212_AUTHORIZATION or T212_API_KEY + T212_API_SECRET
//!     let client = Trading212Client::from_env()?;
//!
//!     let summary = client.get("/api/v0/equity/account/summary", None).await?;
//!     println!("{}", summary.to_pretty_json()?);
//!
//!     let query = Query::new().param("ticker", Some("AAPL_US_EQ"));
//!     let positions = client.get("/api/v0/equity/positions", Some(&query)).await?;
//!     println!("{}", positions.to_pretty_json()?);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod query;
pub mod transport;

pub use client::{Trading212Api, Trading212Client};
pub use config::{basic_auth_header, Configuration, DEFAULT_BASE_URL};
pub use error::{Trading212Error, Trading212Result};
pub use payload::Payload;
pub use query::{format_number, Query, QueryValue};
