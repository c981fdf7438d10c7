use forcelink_client::security::{soql, url as url_security};
use forcelink_client::RequestMethod;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::error::{Error, ErrorKind, Result};
use crate::sobject::{CreateResult, UpsertResult, WriteOptions};

impl super::Session {
    fn sobject_url(&self, type_name: &str, segments: &[&str]) -> Result<String> {
        if segments.iter().any(|s| s.is_empty()) {
            return Err(Error::precondition(format!(
                "{} operation needs a non-empty identity",
                type_name
            )));
        }
        let path = url_security::sobject_path(type_name, segments).ok_or_else(|| {
            Error::precondition(format!("invalid SObject type name {:?}", type_name))
        })?;
        self.resolve_url(&path)
    }

    /// Read all fields of one record.
    #[instrument(skip(self))]
    pub async fn get_sobject(&self, type_name: &str, id: &str) -> Result<Map<String, Value>> {
        let url = self.sobject_url(type_name, &[id])?;
        self.call_json(RequestMethod::Get, &url, None, &[]).await
    }

    /// Insert a record. Fails unless the server reports success and an id.
    #[instrument(skip(self, payload, options))]
    pub async fn create_sobject(
        &self,
        type_name: &str,
        payload: Map<String, Value>,
        options: &WriteOptions,
    ) -> Result<String> {
        let url = self.sobject_url(type_name, &[])?;
        let result: CreateResult = self
            .call_json(
                RequestMethod::Post,
                &url,
                Some(Value::Object(payload)),
                &options.headers(),
            )
            .await?;

        if !result.success {
            return Err(Error::new(ErrorKind::Rejected(result.error_summary())));
        }
        let id = result
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::decode("create response carried no id"))?;

        debug!(id = %id, "Record created");
        Ok(id)
    }

    /// Update fields of an existing record.
    #[instrument(skip(self, payload, options))]
    pub async fn update_sobject(
        &self,
        type_name: &str,
        id: &str,
        payload: Map<String, Value>,
        options: &WriteOptions,
    ) -> Result<()> {
        let url = self.sobject_url(type_name, &[id])?;
        self.call(
            RequestMethod::Patch,
            &url,
            Some(Value::Object(payload)),
            &options.headers(),
        )
        .await?;
        Ok(())
    }

    /// Insert or update by external id.
    ///
    /// `201` with a body means a record was created; `204` (or any other 2xx
    /// without `created: true`) means an existing record was updated.
    #[instrument(skip(self, payload, options))]
    pub async fn upsert_sobject(
        &self,
        type_name: &str,
        external_id_field: &str,
        external_id_value: &str,
        payload: Map<String, Value>,
        options: &WriteOptions,
    ) -> Result<UpsertResult> {
        if !soql::is_safe_field_name(external_id_field) {
            return Err(Error::precondition(format!(
                "invalid external id field {:?}",
                external_id_field
            )));
        }
        let url = self.sobject_url(type_name, &[external_id_field, external_id_value])?;
        let response = self
            .call(
                RequestMethod::Patch,
                &url,
                Some(Value::Object(payload)),
                &options.headers(),
            )
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            if status == 201 {
                return Err(Error::decode("upsert answered 201 without a body"));
            }
            return Ok(UpsertResult {
                id: None,
                created: false,
            });
        }

        let result: CreateResult = serde_json::from_slice(&body)
            .map_err(|e| Error::with_source(ErrorKind::Decode(e.to_string()), e))?;
        if !result.success && !result.errors.is_empty() {
            return Err(Error::new(ErrorKind::Rejected(result.error_summary())));
        }

        let created = status == 201 || result.created == Some(true);
        let id = result.id.filter(|id| !id.is_empty());
        if created && id.is_none() {
            return Err(Error::decode("upsert created a record but returned no id"));
        }

        Ok(UpsertResult { id, created })
    }

    /// Delete a record.
    #[instrument(skip(self))]
    pub async fn delete_sobject(&self, type_name: &str, id: &str) -> Result<()> {
        let url = self.sobject_url(type_name, &[id])?;
        self.call(RequestMethod::Delete, &url, None, &[]).await?;
        Ok(())
    }
}
