//! # forcelink-rest
//!
//! Salesforce REST and Tooling API client built around dynamic records.
//!
//! ## Features
//!
//! - **Session** - SOAP login or an existing access token, shared by cheap handles
//! - **Records** - schema-less SObjects that create, fetch, update, upsert and delete themselves
//! - **SOQL Query** - single pages, `nextRecordsUrl` continuation, or every page at once
//! - **Describe** - global and per-object metadata
//! - **Tooling** - the same query/CRUD surface against `/tooling/`, plus anonymous Apex
//! - **Apex REST** - calls to custom `/services/apexrest/` endpoints
//! - **Downloads** - stream binary content to any `AsyncWrite` or a file
//!
//! ## Example
//!
//! ```rust,ignore
//! use forcelink_rest::{Session, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), forcelink_rest::Error> {
//!     let session = Session::new(SessionConfig::default())?;
//!     session.login("ada@example.com", "password", "SECURITYTOKEN").await?;
//!
//!     let mut account = session.sobject("Account");
//!     account.set("Name", "Analytical Engines Ltd");
//!     account.create().await?;
//!
//!     let page = session.query("SELECT Id, Name, OwnerId FROM Account LIMIT 10").await?;
//!     for record in &page.records {
//!         if let Some(owner) = record.related_record("User", "OwnerId") {
//!             println!("{} owned by {}", record.string_field("Name"), owner.id());
//!         }
//!     }
//!
//!     account.delete(None).await?;
//!     Ok(())
//! }
//! ```

mod apex;
mod config;
mod describe;
mod error;
mod record;
mod session;
mod sobject;

pub use apex::ExecuteAnonymousResult;
pub use config::{SessionConfig, SessionConfigBuilder};
pub use describe::{DescribeGlobalResult, SObjectBasicInfo};
pub use error::{Error, ErrorKind, Result};
pub use record::Record;
pub use session::{ApiMode, Session};
pub use sobject::{
    CreateResult, SalesforceError, UpsertResult, WriteOptions, SERVER_MANAGED_FIELDS,
};

// Re-export the pieces of the lower layers that appear in this crate's API.
pub use forcelink_auth::{Credentials, LoginCredentials, SalesforceCredentials, UserInfo};
pub use forcelink_client::{
    ApiError, ClientConfig, ClientConfigBuilder, QueryResult, RequestMethod,
};
