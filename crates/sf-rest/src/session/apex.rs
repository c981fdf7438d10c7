use forcelink_client::security::url::encode_param;
use forcelink_client::RequestMethod;
use serde_json::Value;
use tracing::instrument;

use crate::apex::ExecuteAnonymousResult;
use crate::error::{Error, Result};

impl super::Session {
    /// Call a custom Apex REST endpoint under `/services/apexrest/`.
    ///
    /// An empty response body is returned as `Value::Null`; a body that is
    /// not JSON is returned as `Value::String`.
    #[instrument(skip(self, body))]
    pub async fn apex_rest(
        &self,
        method: RequestMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value> {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return Err(Error::precondition("Apex REST path must not be empty"));
        }
        let url = self.absolute_url(&format!("services/apexrest/{}", path))?;
        let response = self.call(method, &url, body, &[]).await?;

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    /// Run anonymous Apex through the Tooling API.
    ///
    /// Always targets the tooling namespace, whatever this handle's mode.
    #[instrument(skip(self, apex_body))]
    pub async fn execute_anonymous(&self, apex_body: &str) -> Result<ExecuteAnonymousResult> {
        let url = self.tooling().resolve_url(&format!(
            "executeAnonymous/?anonymousBody={}",
            encode_param(apex_body)
        ))?;
        self.call_json(RequestMethod::Get, &url, None, &[]).await
    }
}
