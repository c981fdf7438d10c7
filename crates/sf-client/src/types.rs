//! Wire types shared by the REST and Tooling query endpoints.

use serde::{Deserialize, Serialize};

/// One page of a SOQL query.
///
/// `records` and `nextRecordsUrl` are optional on the wire; an empty
/// result set may omit the array entirely.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryResult<T> {
    /// Total number of records matching the query.
    #[serde(rename = "totalSize")]
    pub total_size: u64,

    /// Whether this is the last page.
    pub done: bool,

    /// Path of the next page, present while `done` is false.
    #[serde(rename = "nextRecordsUrl", default, skip_serializing_if = "Option::is_none")]
    pub next_records_url: Option<String>,

    /// The records on this page.
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
}

impl<T> QueryResult<T> {
    /// Map every record on the page, keeping the paging metadata.
    pub fn map_records<U>(self, f: impl FnMut(T) -> U) -> QueryResult<U> {
        QueryResult {
            total_size: self.total_size,
            done: self.done,
            next_records_url: self.next_records_url,
            records: self.records.into_iter().map(f).collect(),
        }
    }
}
