use std::future::Future;
use std::path::Path;

use forcelink_client::security::url as url_security;
use forcelink_client::RequestMethod;
use tokio::io::AsyncWrite;
use tracing::{info, instrument, warn};

use crate::error::{Error, Result};

impl super::Session {
    /// Stream a resource into `sink`. Returns the number of bytes written.
    ///
    /// `resource` is either a fragment under the versioned data path
    /// (`sobjects/Document/015.../Body`) or a server-relative path starting
    /// with `/services/`.
    #[instrument(skip(self, sink))]
    pub async fn download<W>(&self, resource: &str, sink: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let url = self.download_url(resource)?;
        let response = self.call(RequestMethod::Get, &url, None, &[]).await?;
        Ok(response.copy_to(sink).await?)
    }

    /// Download the binary content of a `ContentVersion` to `path`.
    ///
    /// The file is only created once the server has answered 2xx, and it is
    /// removed again if the body stream breaks, so a failed download leaves
    /// nothing behind.
    #[instrument(skip(self, path), fields(target = %path.as_ref().display()))]
    pub async fn download_file(
        &self,
        content_version_id: &str,
        path: impl AsRef<Path>,
    ) -> Result<u64> {
        if content_version_id.is_empty() {
            return Err(Error::precondition("content version id must not be empty"));
        }
        let url = self.rest().resolve_url(&format!(
            "sobjects/ContentVersion/{}/VersionData",
            url_security::encode_param(content_version_id)
        ))?;
        let response = self.call(RequestMethod::Get, &url, None, &[]).await?;

        let written = write_or_remove(path.as_ref(), |mut file| async move {
            Ok(response.copy_to(&mut file).await?)
        })
        .await?;

        info!(bytes = written, "File downloaded");
        Ok(written)
    }

    fn download_url(&self, resource: &str) -> Result<String> {
        if resource.is_empty() {
            return Err(Error::precondition("download resource must not be empty"));
        }
        if resource.starts_with("/services/") {
            self.absolute_url(resource)
        } else {
            self.resolve_url(resource)
        }
    }
}

/// Create `path` and hand it to `write`; delete it again if `write` fails.
async fn write_or_remove<F, Fut>(path: &Path, write: F) -> Result<u64>
where
    F: FnOnce(tokio::fs::File) -> Fut,
    Fut: Future<Output = Result<u64>>,
{
    let file = tokio::fs::File::create(path).await?;
    match write(file).await {
        Ok(written) => Ok(written),
        Err(err) => {
            if let Err(remove_err) = tokio::fs::remove_file(path).await {
                warn!(error = %remove_err, "Could not remove partial download");
            }
            Err(err)
        }
    }
}
