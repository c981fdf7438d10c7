use forcelink_auth::{LoginCredentials, SoapLogin, UserInfo};
use tracing::{instrument, warn};

use super::AuthState;
use crate::error::Result;

impl super::Session {
    /// Log in with username, password and security token through the SOAP
    /// partner endpoint. `security_token` may be empty for trusted IP ranges.
    ///
    /// A failed login leaves the session unauthenticated.
    #[instrument(skip(self, password, security_token))]
    pub async fn login(&self, username: &str, password: &str, security_token: &str) -> Result<()> {
        self.login_with(&LoginCredentials::new(username, password, security_token))
            .await
    }

    /// Log in with prepared credentials (see [`LoginCredentials::from_env`]).
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn login_with(&self, credentials: &LoginCredentials) -> Result<()> {
        let config = self.config();
        let login = SoapLogin::new(self.http().clone(), config.login_url.clone())
            .with_api_version(&config.api_version)
            .with_client_id(config.client_id.clone());

        match login.login(credentials).await {
            Ok(result) => {
                self.store_auth(Some(AuthState {
                    session_id: result.session_id,
                    instance_url: result.instance_url,
                    user: result.user,
                }));
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Login failed");
                self.store_auth(None);
                Err(err.into())
            }
        }
    }

    /// Use a session id obtained elsewhere (OAuth flow, CLI, another login).
    pub fn set_session(&self, session_id: impl Into<String>, instance_url: impl Into<String>) {
        let instance_url: String = instance_url.into();
        self.store_auth(Some(AuthState {
            session_id: session_id.into(),
            instance_url: instance_url.trim_end_matches('/').to_string(),
            user: UserInfo::default(),
        }));
    }

    /// Forget the current credential.
    pub fn clear_session(&self) {
        self.store_auth(None);
    }

    /// Returns true once a session id and instance URL are known.
    pub fn is_authenticated(&self) -> bool {
        self.auth_state().is_some()
    }

    /// The current session id, usable as a bearer token elsewhere.
    pub fn session_id(&self) -> Option<String> {
        self.auth_state().map(|a| a.session_id)
    }

    /// The instance URL the session talks to.
    pub fn instance_url(&self) -> Option<String> {
        self.auth_state().map(|a| a.instance_url)
    }

    /// The user returned by the last login. Empty for sessions set with
    /// [`Self::set_session`].
    pub fn user(&self) -> Option<UserInfo> {
        self.auth_state().map(|a| a.user)
    }
}
