use forcelink_client::security::url::encode_param;
use forcelink_client::{QueryResult, RequestMethod};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::record::Record;

/// Prefix that marks a query argument as a continuation path rather than SOQL.
const CONTINUATION_PREFIX: &str = "/services/data";

impl super::Session {
    /// Run a SOQL query, or fetch a continuation page.
    ///
    /// If `query` starts with `/services/data` it is treated as a
    /// `nextRecordsUrl` and requested literally; otherwise it is sent to the
    /// `query` resource of this handle's namespace. Returned records are bound
    /// to this session.
    ///
    /// # Security
    ///
    /// Values interpolated into SOQL must be escaped with
    /// `forcelink_client::security::soql::escape_string`.
    #[instrument(skip(self))]
    pub async fn query(&self, query: &str) -> Result<QueryResult<Record>> {
        if query.starts_with(CONTINUATION_PREFIX) {
            return self.query_more(query).await;
        }
        let url = self.resolve_url(&format!("query?q={}", encode_param(query)))?;
        self.fetch_page(&url).await
    }

    /// Fetch the page behind a `nextRecordsUrl`, using the path as given.
    #[instrument(skip(self))]
    pub async fn query_more(&self, next_records_url: &str) -> Result<QueryResult<Record>> {
        let url = self.absolute_url(next_records_url)?;
        self.fetch_page(&url).await
    }

    /// Run a SOQL query and follow `nextRecordsUrl` until the last page.
    #[instrument(skip(self))]
    pub async fn query_all(&self, soql: &str) -> Result<Vec<Record>> {
        let mut page = self.query(soql).await?;
        let mut records = std::mem::take(&mut page.records);

        while let Some(next) = page.next_records_url.take().filter(|_| !page.done) {
            debug!(next = %next, fetched = records.len(), "Fetching next query page");
            page = self.query_more(&next).await?;
            records.append(&mut page.records);
        }

        Ok(records)
    }

    async fn fetch_page(&self, url: &str) -> Result<QueryResult<Record>> {
        let page: QueryResult<Record> = self.call_json(RequestMethod::Get, url, None, &[]).await?;
        Ok(page.map_records(|mut record| {
            record.bind(self.clone());
            record
        }))
    }
}
