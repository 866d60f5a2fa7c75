//! Transport layer for the Trading 212 client.

pub mod http;

pub use http::HttpTransport;
