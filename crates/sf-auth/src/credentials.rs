//! Credentials trait and implementations.
//!
//! All credential types implement custom Debug to redact sensitive data.

use crate::error::{Error, ErrorKind, Result};

/// Trait for Salesforce credentials.
pub trait Credentials: Send + Sync {
    /// Get the Salesforce instance URL.
    fn instance_url(&self) -> &str;

    /// Get the access token (session id).
    fn access_token(&self) -> &str;

    /// Get the API version (e.g., "62.0").
    fn api_version(&self) -> &str;

    /// Returns true if the credentials appear to be valid (non-empty).
    fn is_valid(&self) -> bool {
        !self.instance_url().is_empty() && !self.access_token().is_empty()
    }
}

/// An access token bound to an instance URL.
///
/// The token is redacted in Debug output.
#[derive(Clone)]
pub struct SalesforceCredentials {
    instance_url: String,
    access_token: String,
    api_version: String,
}

impl std::fmt::Debug for SalesforceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceCredentials")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl SalesforceCredentials {
    /// Create new credentials. A trailing slash on the instance URL and a
    /// leading `v` on the version are dropped.
    pub fn new(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        let instance_url: String = instance_url.into();
        let api_version: String = api_version.into();
        Self {
            instance_url: instance_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            api_version: crate::normalize_api_version(&api_version),
        }
    }

    /// Set a new access token (e.g., after a fresh login).
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = token.into();
    }

    /// Load credentials from environment variables.
    ///
    /// Required environment variables:
    /// - `SF_INSTANCE_URL` or `SALESFORCE_INSTANCE_URL`
    /// - `SF_ACCESS_TOKEN` or `SALESFORCE_ACCESS_TOKEN`
    ///
    /// Optional:
    /// - `SF_API_VERSION` or `SALESFORCE_API_VERSION` (default: "62.0")
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |primary: &str, alias: &str| lookup(primary).or_else(|| lookup(alias));

        let instance_url = var("SF_INSTANCE_URL", "SALESFORCE_INSTANCE_URL")
            .ok_or_else(|| Error::new(ErrorKind::EnvVar("SF_INSTANCE_URL".to_string())))?;
        let access_token = var("SF_ACCESS_TOKEN", "SALESFORCE_ACCESS_TOKEN")
            .ok_or_else(|| Error::new(ErrorKind::EnvVar("SF_ACCESS_TOKEN".to_string())))?;
        let api_version = var("SF_API_VERSION", "SALESFORCE_API_VERSION")
            .unwrap_or_else(|| forcelink_client::DEFAULT_API_VERSION.to_string());

        let creds = Self::new(instance_url, access_token, api_version);
        if !creds.is_valid() {
            return Err(Error::new(ErrorKind::InvalidCredentials(
                "instance URL and access token must not be empty".to_string(),
            )));
        }
        Ok(creds)
    }
}

impl Credentials for SalesforceCredentials {
    fn instance_url(&self) -> &str {
        &self.instance_url
    }

    fn access_token(&self) -> &str {
        &self.access_token
    }

    fn api_version(&self) -> &str {
        &self.api_version
    }
}

/// Username, password and security token for the SOAP login exchange.
///
/// The password and token are redacted in Debug output.
#[derive(Clone)]
pub struct LoginCredentials {
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) security_token: String,
    login_url: Option<String>,
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("security_token", &"[REDACTED]")
            .field("login_url", &self.login_url)
            .finish()
    }
}

impl LoginCredentials {
    /// Create login credentials. `security_token` may be empty when the
    /// caller's IP range is trusted by the org.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        security_token: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            security_token: security_token.into(),
            login_url: None,
        }
    }

    /// Override the login host for this user (e.g. a sandbox or My Domain URL).
    pub fn with_login_url(mut self, login_url: impl Into<String>) -> Self {
        self.login_url = Some(login_url.into());
        self
    }

    /// The username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The login host override, if one was given.
    pub fn login_url(&self) -> Option<&str> {
        self.login_url.as_deref()
    }

    /// Load login credentials from environment variables.
    ///
    /// Required: `SF_USERNAME`, `SF_PASSWORD`.
    /// Optional: `SF_SECURITY_TOKEN` (default empty), `SF_LOGIN_URL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let username = lookup("SF_USERNAME")
            .ok_or_else(|| Error::new(ErrorKind::EnvVar("SF_USERNAME".to_string())))?;
        let password = lookup("SF_PASSWORD")
            .ok_or_else(|| Error::new(ErrorKind::EnvVar("SF_PASSWORD".to_string())))?;
        let security_token = lookup("SF_SECURITY_TOKEN").unwrap_or_default();

        if username.is_empty() {
            return Err(Error::new(ErrorKind::InvalidCredentials(
                "username must not be empty".to_string(),
            )));
        }

        let mut creds = Self::new(username, password, security_token);
        if let Some(url) = lookup("SF_LOGIN_URL").filter(|u| !u.is_empty()) {
            creds = creds.with_login_url(url);
        }
        Ok(creds)
    }
}
