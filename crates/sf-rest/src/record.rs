//! Dynamic SObject records.
//!
//! A [`Record`] is a JSON object as the REST API returns it (`attributes`
//! envelope, `Id`, then plain fields) plus an optional handle on the
//! [`Session`] it came from. The session is never serialized and plays no
//! part in equality, so a record read back from the server compares equal
//! to a locally built one with the same fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::session::Session;
use crate::sobject::{UpsertResult, WriteOptions, SERVER_MANAGED_FIELDS};

const ATTRIBUTES: &str = "attributes";
const ID: &str = "Id";

/// One SObject instance with schema-less fields.
///
/// # Example
///
/// ```rust,ignore
/// let mut contact = session.sobject("Contact");
/// contact.set("LastName", "Lovelace").set("Email", "ada@example.com");
/// contact.create().await?;
///
/// let account = contact.related_record("Account", "AccountId");
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
    #[serde(skip)]
    session: Option<Session>,
}

impl std::fmt::Debug for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Record")
            .field("fields", &self.fields)
            .field("bound", &self.session.is_some())
            .finish()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Record {
    /// An empty, untyped, unbound record.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty record of `type_name`.
    pub fn with_type(type_name: &str) -> Self {
        let mut record = Self::new();
        record.set_type(type_name);
        record
    }

    /// Wrap an already decoded JSON object.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            session: None,
        }
    }

    /// Attach the session that lifecycle calls are sent through.
    pub fn bind(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// `attributes.type`, or `""` when the record is untyped or its
    /// attributes are malformed.
    pub fn type_name(&self) -> &str {
        self.attributes().map(|(t, _)| t).unwrap_or("")
    }

    /// `attributes.url`, or `""`.
    pub fn url(&self) -> &str {
        self.attributes().map(|(_, u)| u).unwrap_or("")
    }

    /// The record id, or `""` if it has none yet.
    pub fn id(&self) -> &str {
        self.string_field(ID)
    }

    /// Raw field lookup.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The field as a string; `""` if it is missing or not a JSON string.
    pub fn string_field(&self, name: &str) -> &str {
        self.fields.get(name).and_then(Value::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Set `attributes.type`, keeping an existing `attributes.url`.
    pub fn set_type(&mut self, type_name: &str) -> &mut Self {
        let url = self
            .fields
            .get(ATTRIBUTES)
            .and_then(|a| a.get("url"))
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();

        let mut attributes = Map::new();
        attributes.insert("type".to_string(), Value::String(type_name.to_string()));
        attributes.insert("url".to_string(), Value::String(url));
        self.fields
            .insert(ATTRIBUTES.to_string(), Value::Object(attributes));
        self
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.fields.insert(ID.to_string(), Value::String(id.into()));
        self
    }

    fn attributes(&self) -> Option<(&str, &str)> {
        let attributes = self.fields.get(ATTRIBUTES)?.as_object()?;
        let type_name = attributes.get("type")?.as_str()?;
        let url = match attributes.get("url") {
            None => "",
            Some(Value::String(url)) => url.as_str(),
            Some(_) => return None,
        };
        Some((type_name, url))
    }

    /// The record a lookup field points at.
    ///
    /// A plain id in `foreign_key_field` yields a stub of `type_name` holding
    /// only that id. An expanded relationship object (with its own
    /// `attributes.type` and `attributes.url`) yields the full nested record,
    /// its id taken from the last segment of the url. Both are bound to this
    /// record's session. Anything else yields `None`.
    pub fn related_record(&self, type_name: &str, foreign_key_field: &str) -> Option<Record> {
        let mut related = match self.fields.get(foreign_key_field)? {
            Value::String(id) if !id.is_empty() => {
                let mut stub = Record::with_type(type_name);
                stub.set_id(id.as_str());
                stub
            }
            Value::Object(nested) => {
                let mut record = Record::from_fields(nested.clone());
                let (nested_type, url) = record.attributes()?;
                if nested_type.is_empty() || url.is_empty() {
                    return None;
                }
                let id = url.trim_end_matches('/').rsplit('/').next().unwrap_or("");
                if id.is_empty() {
                    return None;
                }
                let id = id.to_string();
                record.set_id(id);
                record
            }
            _ => return None,
        };
        if let Some(session) = &self.session {
            related.bind(session.clone());
        }
        Some(related)
    }

    /// The JSON object sent on create, update and upsert.
    ///
    /// Leaves out `attributes`, `Id`, [`SERVER_MANAGED_FIELDS`] and every
    /// name in `exclude`.
    pub fn to_payload<S: AsRef<str>>(&self, exclude: &[S]) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|(name, _)| {
                let name = name.as_str();
                name != ATTRIBUTES
                    && name != ID
                    && !SERVER_MANAGED_FIELDS.contains(&name)
                    && !exclude.iter().any(|e| e.as_ref() == name)
            })
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    fn target(&self) -> Result<(String, Session)> {
        let type_name = self.type_name();
        if type_name.is_empty() {
            return Err(Error::precondition("record has no SObject type"));
        }
        let session = self
            .session
            .clone()
            .ok_or_else(|| Error::precondition("record is not bound to a session"))?;
        Ok((type_name.to_string(), session))
    }

    fn identity(&self, id: Option<&str>) -> Result<String> {
        let id = id.unwrap_or_else(|| self.id());
        if id.is_empty() {
            return Err(Error::precondition("record has no id"));
        }
        Ok(id.to_string())
    }

    /// Describe this record's SObject type.
    pub async fn describe(&self) -> Result<Map<String, Value>> {
        let (type_name, session) = self.target()?;
        session.describe(&type_name).await
    }

    /// Load all fields of the record into `self`.
    ///
    /// `id` overrides the record's own id. Returned fields are merged over
    /// the local ones.
    #[instrument(skip(self), fields(sobject = %self.type_name()))]
    pub async fn fetch(&mut self, id: Option<&str>) -> Result<&mut Self> {
        let (type_name, session) = self.target()?;
        let id = self.identity(id)?;

        let fields = session.get_sobject(&type_name, &id).await?;
        self.fields.extend(fields);
        Ok(self)
    }

    /// Insert the record and store the new id in it.
    pub async fn create(&mut self) -> Result<&mut Self> {
        self.create_with(&WriteOptions::default()).await
    }

    #[instrument(skip(self, options), fields(sobject = %self.type_name()))]
    pub async fn create_with(&mut self, options: &WriteOptions) -> Result<&mut Self> {
        let (type_name, session) = self.target()?;
        let payload = self.to_payload(options.exclude_fields.as_slice());

        let id = session.create_sobject(&type_name, payload, options).await?;
        self.set_id(id);
        Ok(self)
    }

    /// Send the record's fields to the existing remote record.
    pub async fn update(&self) -> Result<()> {
        self.update_with(&WriteOptions::default()).await
    }

    #[instrument(skip(self, options), fields(sobject = %self.type_name()))]
    pub async fn update_with(&self, options: &WriteOptions) -> Result<()> {
        let (type_name, session) = self.target()?;
        let id = self.identity(None)?;
        let payload = self.to_payload(options.exclude_fields.as_slice());

        session
            .update_sobject(&type_name, &id, payload, options)
            .await
    }

    /// Insert or update by external id.
    ///
    /// Returns the receiver together with the outcome. The record's id is
    /// replaced only when the server created a new record.
    pub async fn upsert(
        &mut self,
        external_id_field: &str,
        external_id_value: &str,
    ) -> Result<(&mut Self, UpsertResult)> {
        self.upsert_with(external_id_field, external_id_value, &WriteOptions::default())
            .await
    }

    #[instrument(skip(self, options), fields(sobject = %self.type_name()))]
    pub async fn upsert_with(
        &mut self,
        external_id_field: &str,
        external_id_value: &str,
        options: &WriteOptions,
    ) -> Result<(&mut Self, UpsertResult)> {
        let (type_name, session) = self.target()?;
        if external_id_value.is_empty() {
            return Err(Error::precondition("external id value must not be empty"));
        }
        let payload = self.to_payload(options.exclude_fields.as_slice());

        let result = session
            .upsert_sobject(
                &type_name,
                external_id_field,
                external_id_value,
                payload,
                options,
            )
            .await?;
        if result.created {
            if let Some(id) = &result.id {
                self.set_id(id.as_str());
            }
        }
        debug!(created = result.created, "Upsert finished");
        Ok((self, result))
    }

    /// Delete the remote record. The local value is left as is.
    ///
    /// `id` overrides the record's own id.
    pub async fn delete(&self, id: Option<&str>) -> Result<()> {
        let (type_name, session) = self.target()?;
        let id = self.identity(id)?;
        session.delete_sobject(&type_name, &id).await
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_fields(fields)
    }
}
