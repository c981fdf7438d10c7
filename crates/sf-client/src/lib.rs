//! # forcelink-client
//!
//! HTTP transport layer shared by the forcelink crates.
//!
//! This crate provides:
//! - [`SfHttpClient`], a thin wrapper over `reqwest` that sends one request
//!   per call and routes every non-2xx response through the error classifier
//! - [`RequestBuilder`] for method/URL/body/header tuples
//! - [`classify`], the pure function that normalizes Salesforce error bodies
//!   (JSON error arrays, SOAP faults, opaque text) into an [`ApiError`]
//! - security helpers for SOQL literals, URL path segments and XML text
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 forcelink-rest (Session, Record)            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SfHttpClient                             │
//! │  - bearer auth, JSON defaults, compression                  │
//! │  - single attempt, no retry                                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  non-2xx
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    classify(status, body)                   │
//! │  JSON array → SOAP fault → opaque text                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use forcelink_client::{ClientConfig, SfHttpClient};
//!
//! let http = SfHttpClient::new(ClientConfig::default())?;
//! let request = http
//!     .get("https://na1.salesforce.com/services/data/v62.0/limits")
//!     .bearer_auth(token);
//! let limits: serde_json::Value = http.send_json(request).await?;
//! ```

mod api_error;
mod client;
mod config;
mod error;
mod request;
mod response;
mod types;
pub mod security;
pub mod xml;

pub use api_error::{classify, ApiError};
pub use client::SfHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBody, RequestBuilder, RequestMethod};
pub use response::Response;
pub use types::QueryResult;

/// Default Salesforce API version.
pub const DEFAULT_API_VERSION: &str = "62.0";

/// User-Agent string for the client.
pub const USER_AGENT: &str = concat!("forcelink/", env!("CARGO_PKG_VERSION"));
