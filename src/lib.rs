//! # forcelink
//!
//! A Salesforce client built around dynamic, schema-less records.
//!
//! Sensitive data (session ids, passwords, security tokens) is redacted in
//! `Debug` output and skipped by tracing spans.
//!
//! ## Crates
//!
//! - **forcelink-client** - HTTP transport, request/response types, error classifier
//! - **forcelink-auth** - SOAP username/password login, token credentials
//! - **forcelink-rest** - Session, Record, SOQL, CRUD/upsert, describe, Tooling, Apex, downloads
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use forcelink::{LoginCredentials, Session, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Session::new(SessionConfig::default())?;
//!     session.login_with(&LoginCredentials::from_env()?).await?;
//!
//!     let page = session.query("SELECT Id, Name FROM Account LIMIT 10").await?;
//!     for account in &page.records {
//!         println!("{} {}", account.id(), account.string_field("Name"));
//!     }
//!
//!     Ok(())
//! }
//! ```

#[cfg(feature = "auth")]
pub use forcelink_auth as auth;
#[cfg(feature = "client")]
pub use forcelink_client as client;
#[cfg(feature = "rest")]
pub use forcelink_rest as rest;

#[cfg(feature = "auth")]
pub use forcelink_auth::{Credentials, LoginCredentials, SalesforceCredentials, UserInfo};
#[cfg(feature = "client")]
pub use forcelink_client::{classify, ApiError, ClientConfig, QueryResult, RequestMethod};
#[cfg(feature = "rest")]
pub use forcelink_rest::{
    ApiMode, Error, ErrorKind, ExecuteAnonymousResult, Record, Result, Session, SessionConfig,
    UpsertResult, WriteOptions,
};
