//! Authenticated transport for the REST and Tooling APIs.
//!
//! A [`Session`] is a cheap handle: clones share the HTTP client and the
//! credential state. Tooling mode is not a flag on that shared state but a
//! property of the handle, so `session.tooling()` never changes what other
//! holders of the same session talk to.

use std::sync::{Arc, RwLock};

use forcelink_auth::{Credentials, UserInfo};
use forcelink_client::{RequestBuilder, RequestMethod, Response, SfHttpClient};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;

use crate::config::SessionConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::record::Record;

mod apex;
mod auth;
mod binary;
mod describe;
mod query;
mod sobject;

/// Which API namespace query and CRUD calls are sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiMode {
    /// `/services/data/vXX.X/`
    #[default]
    Rest,
    /// `/services/data/vXX.X/tooling/`
    Tooling,
}

/// A (possibly not yet authenticated) connection to one Salesforce org.
///
/// # Example
///
/// ```rust,ignore
/// use forcelink_rest::{Session, SessionConfig};
///
/// let session = Session::new(SessionConfig::default())?;
/// session.login("ada@example.com", "password", "SECURITYTOKEN").await?;
///
/// let mut case = session.sobject("Case");
/// case.set("Subject", "Printer on fire");
/// case.create().await?;
///
/// let classes = session.tooling().query("SELECT Id, Name FROM ApexClass").await?;
/// ```
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
    mode: ApiMode,
}

struct SessionInner {
    http: SfHttpClient,
    config: SessionConfig,
    auth: RwLock<Option<AuthState>>,
}

#[derive(Clone)]
pub(crate) struct AuthState {
    pub(crate) session_id: String,
    pub(crate) instance_url: String,
    pub(crate) user: UserInfo,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let auth = self.auth_state();
        f.debug_struct("Session")
            .field("instance_url", &auth.as_ref().map(|a| a.instance_url.clone()))
            .field("session_id", &auth.as_ref().map(|_| "[REDACTED]"))
            .field("api_version", &self.inner.config.api_version)
            .field("mode", &self.mode)
            .finish()
    }
}

impl Session {
    /// Create an unauthenticated session. Call [`Session::login`] or
    /// [`Session::set_session`] before issuing requests.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let http = SfHttpClient::new(config.client.clone())?;
        Ok(Self {
            inner: Arc::new(SessionInner {
                http,
                config,
                auth: RwLock::new(None),
            }),
            mode: ApiMode::Rest,
        })
    }

    /// Create a session that is already authenticated with an access token.
    pub fn from_credentials(creds: &impl Credentials) -> Result<Self> {
        let config = SessionConfig::builder()
            .with_api_version(creds.api_version())
            .build();
        let session = Self::new(config)?;
        session.set_session(creds.access_token(), creds.instance_url());
        Ok(session)
    }

    /// The configuration this session was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// API version without the leading `v`.
    pub fn api_version(&self) -> &str {
        &self.inner.config.api_version
    }

    /// The namespace this handle targets.
    pub fn mode(&self) -> ApiMode {
        self.mode
    }

    /// Returns true if this handle targets the Tooling API.
    pub fn is_tooling(&self) -> bool {
        self.mode == ApiMode::Tooling
    }

    /// A handle on the same session that targets the Tooling API.
    pub fn tooling(&self) -> Session {
        self.with_mode(ApiMode::Tooling)
    }

    /// A handle on the same session that targets the regular REST API.
    pub fn rest(&self) -> Session {
        self.with_mode(ApiMode::Rest)
    }

    fn with_mode(&self, mode: ApiMode) -> Session {
        Session {
            inner: Arc::clone(&self.inner),
            mode,
        }
    }

    /// Returns true if two handles share the same underlying session.
    pub fn same_session(&self, other: &Session) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// A new, unsaved record of `type_name` bound to this session.
    pub fn sobject(&self, type_name: &str) -> Record {
        let mut record = Record::with_type(type_name);
        record.bind(self.clone());
        record
    }

    /// A new, untyped record bound to this session.
    pub fn record(&self) -> Record {
        let mut record = Record::new();
        record.bind(self.clone());
        record
    }

    pub(crate) fn auth_state(&self) -> Option<AuthState> {
        self.inner
            .auth
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub(crate) fn store_auth(&self, state: Option<AuthState>) {
        *self
            .inner
            .auth
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = state;
    }

    fn require_auth(&self) -> Result<AuthState> {
        self.auth_state()
            .ok_or_else(|| Error::new(ErrorKind::NotAuthenticated))
    }

    /// Full URL for a resource fragment, e.g. `sobjects/Account/001...`.
    ///
    /// The fragment is placed under `/services/data/v{version}/` (plus
    /// `tooling/` for tooling handles); repeated slashes in the path are
    /// collapsed. Fails if the session has no instance URL yet.
    pub fn resolve_url(&self, fragment: &str) -> Result<String> {
        let auth = self.require_auth()?;
        Ok(compose_url(
            &auth.instance_url,
            self.api_version(),
            self.mode,
            fragment,
        ))
    }

    /// Full URL for a server-relative path such as a `nextRecordsUrl` or
    /// `/services/apexrest/...`. The path is used literally.
    pub fn absolute_url(&self, path: &str) -> Result<String> {
        let auth = self.require_auth()?;
        Ok(format!(
            "{}/{}",
            auth.instance_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }

    /// Send an authenticated request.
    ///
    /// `Content-Type: application/json` is set by default; any entry in
    /// `headers` with the same name replaces it. Statuses outside 200..300
    /// come back as [`ErrorKind::Api`].
    #[instrument(skip(self, body, headers), fields(method = %method))]
    pub async fn call(
        &self,
        method: RequestMethod,
        url: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> Result<Response> {
        let auth = self.require_auth()?;

        let mut request = RequestBuilder::new(method, url)
            .bearer_auth(auth.session_id)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            request = request.json_value(body);
        }
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        Ok(self.inner.http.execute(request).await?)
    }

    pub(crate) async fn call_json<T: DeserializeOwned>(
        &self,
        method: RequestMethod,
        url: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> Result<T> {
        let response = self.call(method, url, body, headers).await?;
        Ok(response.json().await?)
    }

    pub(crate) fn http(&self) -> &SfHttpClient {
        &self.inner.http
    }
}

fn compose_url(instance_url: &str, api_version: &str, mode: ApiMode, fragment: &str) -> String {
    let namespace = match mode {
        ApiMode::Rest => "",
        ApiMode::Tooling => "tooling/",
    };
    let raw = format!("/services/data/v{}/{}{}", api_version, namespace, fragment);

    let (path, query) = match raw.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (raw.as_str(), None),
    };

    let mut url = String::with_capacity(instance_url.len() + raw.len());
    url.push_str(instance_url.trim_end_matches('/'));
    let mut previous_slash = false;
    for ch in path.chars() {
        if ch == '/' && previous_slash {
            continue;
        }
        previous_slash = ch == '/';
        url.push(ch);
    }
    if let Some(query) = query {
        url.push('?');
        url.push_str(query);
    }
    url
}
