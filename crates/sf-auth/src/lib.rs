//! # forcelink-auth
//!
//! Salesforce authentication for forcelink.
//!
//! ## Security
//!
//! - Passwords, security tokens and session ids are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Transport error messages are scrubbed of bearer tokens
//!
//! ## Supported Authentication Methods
//!
//! - **SOAP username/password login** - username, password and security token
//!   exchanged for a session id on the partner endpoint
//! - **Externally obtained access token** - an instance URL and token from any
//!   other flow, see [`SalesforceCredentials`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use forcelink_auth::{LoginCredentials, SoapLogin, PRODUCTION_LOGIN_URL};
//! use forcelink_client::SfHttpClient;
//!
//! let http = SfHttpClient::default_client()?;
//! let result = SoapLogin::new(http, PRODUCTION_LOGIN_URL)
//!     .login(&LoginCredentials::from_env()?)
//!     .await?;
//! println!("logged in as {}", result.user.name);
//! ```

mod credentials;
mod error;
mod login;

pub use credentials::{Credentials, LoginCredentials, SalesforceCredentials};
pub use error::{Error, ErrorKind, Result};
pub use login::{LoginResult, SoapLogin, UserInfo};

/// Default Salesforce login URL for production.
pub const PRODUCTION_LOGIN_URL: &str = "https://login.salesforce.com";

/// Default Salesforce login URL for sandbox.
pub const SANDBOX_LOGIN_URL: &str = "https://test.salesforce.com";

/// Client id sent in the SOAP `CallOptions` header unless overridden.
pub const DEFAULT_CLIENT_ID: &str = "forcelink";

/// Strip the leading `v` some callers put in front of an API version.
pub fn normalize_api_version(version: &str) -> String {
    let trimmed = version.trim();
    trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed)
        .to_string()
}
