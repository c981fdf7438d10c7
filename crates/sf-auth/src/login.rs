//! Username/password login through the SOAP partner endpoint.
//!
//! The SOAP `login` call accepts any placeholder client id, which is what
//! makes it usable without a connected app. A successful exchange yields a
//! session id that doubles as a REST bearer token.

use forcelink_client::security::xml::escape;
use forcelink_client::xml::XmlDocument;
use forcelink_client::SfHttpClient;
use tracing::{info, instrument};

use crate::credentials::{LoginCredentials, SalesforceCredentials};
use crate::error::{Error, ErrorKind, Result};

/// The user a session was opened for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub full_name: String,
    pub email: String,
}

/// Outcome of a successful login.
#[derive(Clone)]
pub struct LoginResult {
    pub session_id: String,
    /// SOAP endpoint returned by the server.
    pub server_url: String,
    /// `scheme://host[:port]` of `server_url`.
    pub instance_url: String,
    pub user: UserInfo,
}

impl std::fmt::Debug for LoginResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResult")
            .field("session_id", &"[REDACTED]")
            .field("server_url", &self.server_url)
            .field("instance_url", &self.instance_url)
            .field("user", &self.user)
            .finish()
    }
}

impl LoginResult {
    /// Turn the session into bearer credentials for the REST API.
    pub fn into_credentials(self, api_version: &str) -> SalesforceCredentials {
        SalesforceCredentials::new(self.instance_url, self.session_id, api_version)
    }
}

/// Performs the SOAP `login` exchange against a login host.
#[derive(Debug, Clone)]
pub struct SoapLogin {
    http: SfHttpClient,
    login_url: String,
    api_version: String,
    client_id: String,
}

impl SoapLogin {
    /// Create a login client for `login_url` (e.g. `https://login.salesforce.com`).
    pub fn new(http: SfHttpClient, login_url: impl Into<String>) -> Self {
        let login_url: String = login_url.into();
        Self {
            http,
            login_url: login_url.trim_end_matches('/').to_string(),
            api_version: forcelink_client::DEFAULT_API_VERSION.to_string(),
            client_id: crate::DEFAULT_CLIENT_ID.to_string(),
        }
    }

    /// Set the API version of the SOAP endpoint. A leading `v` is dropped.
    pub fn with_api_version(mut self, version: impl AsRef<str>) -> Self {
        self.api_version = crate::normalize_api_version(version.as_ref());
        self
    }

    /// Set the client id reported in the `CallOptions` header.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// The SOAP endpoint the login request is posted to.
    pub fn endpoint(&self, login_url: Option<&str>) -> String {
        let base = login_url
            .map(|u| u.trim_end_matches('/'))
            .unwrap_or(&self.login_url);
        format!("{}/services/Soap/u/{}", base, self.api_version)
    }

    /// Log in. The credentials' own login URL, when set, takes precedence.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResult> {
        if credentials.username.is_empty() {
            return Err(Error::new(ErrorKind::InvalidCredentials(
                "username must not be empty".to_string(),
            )));
        }

        let request = self
            .http
            .post(self.endpoint(credentials.login_url()))
            .xml(self.envelope(credentials))
            .header("SOAPAction", "login");

        let body = self.http.execute(request).await?.text().await?;
        let result = parse_login_response(&body)?;

        info!(user = %result.user.name, instance_url = %result.instance_url, "User authenticated");
        Ok(result)
    }

    fn envelope(&self, credentials: &LoginCredentials) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8" ?>
<env:Envelope xmlns:xsd="http://www.w3.org/2001/XMLSchema"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xmlns:env="http://schemas.xmlsoap.org/soap/envelope/"
        xmlns:urn="urn:partner.soap.sforce.com">
    <env:Header>
        <urn:CallOptions>
            <urn:client>{client}</urn:client>
            <urn:defaultNamespace>sf</urn:defaultNamespace>
        </urn:CallOptions>
    </env:Header>
    <env:Body>
        <n1:login xmlns:n1="urn:partner.soap.sforce.com">
            <n1:username>{username}</n1:username>
            <n1:password>{password}{token}</n1:password>
        </n1:login>
    </env:Body>
</env:Envelope>"#,
            client = escape(&self.client_id),
            username = escape(&credentials.username),
            password = escape(&credentials.password),
            token = escape(&credentials.security_token),
        )
    }
}

const RESULT: [&str; 3] = ["Body", "loginResponse", "result"];

fn parse_login_response(body: &str) -> Result<LoginResult> {
    let doc = XmlDocument::parse(body).map_err(|e| {
        Error::with_source(ErrorKind::InvalidResponse(e.to_string()), e)
    })?;

    let field = |path: &[&str]| -> String {
        let full: Vec<&str> = RESULT.iter().chain(path).copied().collect();
        doc.text_at(&full).unwrap_or_default().to_string()
    };

    let session_id = field(&["sessionId"]);
    let server_url = field(&["serverUrl"]);
    if session_id.is_empty() || server_url.is_empty() {
        return Err(Error::new(ErrorKind::InvalidResponse(
            "login response carried no sessionId/serverUrl".to_string(),
        )));
    }

    let instance_url = url::Url::parse(&server_url)
        .map(|u| u.origin().ascii_serialization())
        .map_err(|e| Error::with_source(ErrorKind::InvalidResponse(e.to_string()), e))?;

    Ok(LoginResult {
        session_id,
        server_url,
        instance_url,
        user: UserInfo {
            id: field(&["userId"]),
            name: field(&["userInfo", "userName"]),
            full_name: field(&["userInfo", "userFullName"]),
            email: field(&["userInfo", "userEmail"]),
        },
    })
}
