//! SObject write types.

use serde::{Deserialize, Serialize};

/// Server-managed fields that the API rejects on insert/update.
///
/// They are always removed from outbound payloads, in addition to
/// `attributes`, `Id` and whatever [`WriteOptions::exclude_fields`] lists.
pub const SERVER_MANAGED_FIELDS: &[&str] = &[
    "LastModifiedDate",
    "LastReferencedDate",
    "IsClosed",
    "ContactPhone",
    "CreatedById",
    "CaseNumber",
    "ContactFax",
    "ContactMobile",
    "IsDeleted",
    "LastViewedDate",
    "SystemModstamp",
    "CreatedDate",
    "ContactEmail",
    "ClosedDate",
    "LastModifiedById",
];

/// Per-call options for create, update and upsert.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Extra fields to leave out of the payload.
    pub exclude_fields: Vec<String>,
    /// Save even when a duplicate rule would block the write
    /// (`Sforce-Duplicate-Rule-Header: allowSave=true`).
    pub allow_duplicates: bool,
}

impl WriteOptions {
    /// Default options: no extra exclusions, duplicate rules enforced.
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave `field` out of the payload.
    pub fn exclude(mut self, field: impl Into<String>) -> Self {
        self.exclude_fields.push(field.into());
        self
    }

    /// Leave every field in `fields` out of the payload.
    pub fn exclude_all<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Ask the server to save despite duplicate rules.
    pub fn allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    pub(crate) fn headers(&self) -> Vec<(&'static str, &'static str)> {
        if self.allow_duplicates {
            vec![("Sforce-Duplicate-Rule-Header", "allowSave=true")]
        } else {
            Vec::new()
        }
    }
}

/// Body of a successful create (and of an upsert that created a record).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub created: Option<bool>,
    #[serde(default)]
    pub errors: Vec<SalesforceError>,
}

impl CreateResult {
    pub(crate) fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return "server reported success=false".to_string();
        }
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.status_code, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Outcome of an upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertResult {
    /// Id reported by the server, when the response had a body.
    pub id: Option<String>,
    /// True if a new record was inserted.
    pub created: bool,
}

/// Error entry inside a write result.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SalesforceError {
    #[serde(rename = "statusCode", default)]
    pub status_code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub fields: Vec<String>,
}
