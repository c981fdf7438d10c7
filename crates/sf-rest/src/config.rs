//! Session configuration.

use forcelink_auth::{normalize_api_version, DEFAULT_CLIENT_ID, PRODUCTION_LOGIN_URL};
use forcelink_client::{ClientConfig, DEFAULT_API_VERSION};

/// Configuration for a [`crate::Session`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Host the SOAP login is posted to.
    pub login_url: String,
    /// API version without the leading `v` (e.g. "62.0").
    pub api_version: String,
    /// Client id reported to the SOAP login endpoint.
    pub client_id: String,
    /// HTTP transport settings.
    pub client: ClientConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_url: PRODUCTION_LOGIN_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            client: ClientConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Create a new session config builder.
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }
}

/// Builder for SessionConfig.
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Set the login host (`https://test.salesforce.com` for sandboxes).
    pub fn with_login_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.config.login_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the API version. `v62.0` and `62.0` are equivalent.
    pub fn with_api_version(mut self, version: impl AsRef<str>) -> Self {
        self.config.api_version = normalize_api_version(version.as_ref());
        self
    }

    /// Set the SOAP client id.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.config.client_id = client_id.into();
        self
    }

    /// Set the HTTP transport configuration.
    pub fn with_client_config(mut self, client: ClientConfig) -> Self {
        self.config.client = client;
        self
    }

    /// Build the session configuration.
    pub fn build(self) -> SessionConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.login_url, "https://login.salesforce.com");
        assert_eq!(config.api_version, "62.0");
        assert_eq!(config.client_id, "forcelink");
    }

    #[test]
    fn test_builder_normalizes() {
        let config = SessionConfig::builder()
            .with_login_url("https://test.salesforce.com/")
            .with_api_version("v43.0")
            .with_client_id("integration-suite")
            .build();

        assert_eq!(config.login_url, "https://test.salesforce.com");
        assert_eq!(config.api_version, "43.0");
        assert_eq!(config.client_id, "integration-suite");
    }
}
