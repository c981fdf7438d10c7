use forcelink_client::security::soql;
use forcelink_client::RequestMethod;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::describe::DescribeGlobalResult;
use crate::error::{Error, Result};

impl super::Session {
    /// List every SObject available to the user.
    #[instrument(skip(self))]
    pub async fn describe_global(&self) -> Result<DescribeGlobalResult> {
        let url = self.resolve_url("sobjects")?;
        self.call_json(RequestMethod::Get, &url, None, &[]).await
    }

    /// Full metadata for one SObject type, as returned by the server.
    #[instrument(skip(self))]
    pub async fn describe(&self, type_name: &str) -> Result<Map<String, Value>> {
        if !soql::is_safe_sobject_name(type_name) {
            return Err(Error::precondition(format!(
                "invalid SObject type name {:?}",
                type_name
            )));
        }
        let url = self.resolve_url(&format!("sobjects/{}/describe", type_name))?;
        self.call_json(RequestMethod::Get, &url, None, &[]).await
    }
}
