//! Describe types.
//!
//! Per-object describe results are consumed opaquely (see
//! [`crate::Session::describe`]); only the global object list has a typed shape.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of the describeGlobal operation: every SObject visible to the user.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DescribeGlobalResult {
    /// Character encoding (e.g., "UTF-8").
    #[serde(default)]
    pub encoding: String,

    /// Maximum batch size for composite operations.
    #[serde(rename = "maxBatchSize", default)]
    pub max_batch_size: u32,

    /// One entry per SObject.
    #[serde(default)]
    pub sobjects: Vec<SObjectBasicInfo>,
}

impl DescribeGlobalResult {
    /// Look up an object by API name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&SObjectBasicInfo> {
        self.sobjects
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

/// Basic information about an SObject from describeGlobal.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SObjectBasicInfo {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "labelPlural", default)]
    pub label_plural: String,
    #[serde(rename = "keyPrefix")]
    pub key_prefix: Option<String>,
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub queryable: bool,
    #[serde(default)]
    pub createable: bool,
    #[serde(default)]
    pub updateable: bool,
    #[serde(default)]
    pub deletable: bool,
    #[serde(default)]
    pub urls: HashMap<String, String>,
}
