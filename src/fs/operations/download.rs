//! Reading file contents.

use tracing::{debug, warn};

use crate::adapter::BoxAdapter;
use crate::api::{Command, Gateway, Response};
use crate::error::{BoxError, Result};
use crate::fs::entry::EntryKind;

impl<G: Gateway> BoxAdapter<G> {
    /// Download a file's contents.
    ///
    /// Box usually answers a download with a redirect to a short-lived URL;
    /// up to the adapter's redirect cap is followed.
    pub async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let internal = self.prefix.apply(path)?;

        let mut response = {
            let mut cache = self.lock().await;
            let id = self
                .resolve(&mut cache, &internal, EntryKind::File)
                .await?
                .ok_or_else(|| self.not_found(&internal))?;
            self.call_for(&mut cache, &internal, &Command::DownloadFile { id })
                .await?
        };

        let mut redirects = 0;
        loop {
            match response {
                Response::Body { body, .. } => {
                    debug!(path = %internal, size = body.len(), redirects, "downloaded file");
                    return Ok(body);
                }
                // Zero-byte file
                Response::Empty { status: 200 | 204 } => return Ok(Vec::new()),
                // e.g. 202 Accepted: the content is not ready to be served yet
                Response::Empty { status } => {
                    warn!(path = %internal, status, "download returned no content");
                    return Err(BoxError::InvalidResponse);
                }
                Response::Redirect { location, .. } => {
                    if redirects >= self.max_redirects {
                        return Err(BoxError::TooManyRedirects);
                    }
                    redirects += 1;
                    response = self.gateway.follow(&location).await?.into_result()?;
                }
                failure @ Response::Failure { .. } => {
                    failure.into_result()?;
                    return Err(BoxError::InvalidResponse);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::BoxError;
    use crate::fs::operations::test_support::adapter;

    #[tokio::test]
    async fn test_read_direct_body() {
        let (mock, adapter) = adapter();
        let a = mock.add_folder("0", "a");
        mock.add_file(&a, "b.txt", b"contents");

        assert_eq!(adapter.read("/a/b.txt").await.unwrap(), b"contents");
        assert_eq!(mock.calls("follow"), 0);
    }

    #[tokio::test]
    async fn test_read_follows_redirect() {
        let (mock, adapter) = adapter();
        mock.add_file("0", "b.txt", b"redirected");
        mock.set_redirect_downloads(true);

        assert_eq!(adapter.read("/b.txt").await.unwrap(), b"redirected");
        assert_eq!(mock.calls("download_file"), 1);
        assert_eq!(mock.calls("follow"), 1);
    }

    #[tokio::test]
    async fn test_read_redirect_cap() {
        let (mock, adapter) = adapter();
        let adapter = adapter.with_max_redirects(0);
        mock.add_file("0", "b.txt", b"redirected");
        mock.set_redirect_downloads(true);

        let err = adapter.read("/b.txt").await.unwrap_err();
        assert!(matches!(err, BoxError::TooManyRedirects));
        assert_eq!(mock.calls("follow"), 0);
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let (mock, adapter) = adapter();
        mock.add_folder("0", "dir");

        assert!(adapter.read("/nope.txt").await.unwrap_err().is_not_found());
        assert!(adapter.read("/dir").await.unwrap_err().is_not_found());
        assert_eq!(mock.calls("download_file"), 0);
    }

    #[tokio::test]
    async fn test_read_whitespace_only_file() {
        let (mock, adapter) = adapter();
        mock.add_file("0", "ws.txt", b"  \n\t\n");
        mock.add_file("0", "nl.txt", b"\n");

        assert_eq!(adapter.read("/ws.txt").await.unwrap(), b"  \n\t\n");
        mock.set_redirect_downloads(true);
        assert_eq!(adapter.read("/nl.txt").await.unwrap(), b"\n");
    }

    #[tokio::test]
    async fn test_read_not_ready_is_an_error() {
        let (mock, adapter) = adapter();
        mock.add_file("0", "big.bin", b"contents");
        mock.set_pending_downloads(true);

        let err = adapter.read("/big.bin").await.unwrap_err();
        assert!(matches!(err, BoxError::InvalidResponse));
        // The file itself is fine and stays cached
        assert!(adapter.cached("/big.bin").await.is_some());
    }

    #[tokio::test]
    async fn test_read_empty_file() {
        let (mock, adapter) = adapter();
        mock.add_file("0", "empty", b"");

        assert!(adapter.read("/empty").await.unwrap().is_empty());
    }
}
