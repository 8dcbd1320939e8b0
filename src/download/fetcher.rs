//! Single-item fetch-and-store.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, instrument};

use super::HttpClient;
use super::error::DownloadError;
use super::filename::{is_eligible, resolve_filename};
use super::result::DownloadResult;

/// Fetches one URL at a time into a download directory.
///
/// Cheap to clone; every strategy hands a clone to each of its workers.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: HttpClient,
    download_dir: PathBuf,
}

impl Fetcher {
    /// Creates a fetcher writing into `download_dir`, which must already exist.
    pub fn new(client: HttpClient, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            download_dir: download_dir.into(),
        }
    }

    /// Returns the directory images are written to.
    #[must_use]
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Fetches `url` and stores it under its resolved filename.
    ///
    /// Ineligible URLs return a skip without touching the network. Any fault
    /// is folded into a failed result; nothing is retried.
    #[instrument(level = "debug", skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> DownloadResult {
        let filename = resolve_filename(url);
        if !is_eligible(&filename) {
            debug!(%filename, "skipping ineligible filename");
            return DownloadResult::skipped(url, filename);
        }

        match self.fetch_eligible(url, &filename).await {
            Ok(result) => {
                info!(
                    %filename,
                    elapsed_ms = result.elapsed.as_millis(),
                    "Download success {filename}. Loading time: {:.4} sec.",
                    result.elapsed.as_secs_f64()
                );
                result
            }
            Err(e) => {
                debug!(%filename, error = %e, "download failed");
                DownloadResult::failed(url, filename, e.to_string())
            }
        }
    }

    async fn fetch_eligible(
        &self,
        url: &str,
        filename: &str,
    ) -> Result<DownloadResult, DownloadError> {
        let body = self.client.get_bytes(url).await?;
        let path = self.download_dir.join(filename);

        let start = Instant::now();
        tokio::fs::write(&path, &body)
            .await
            .map_err(|e| DownloadError::io(&path, e))?;
        let elapsed = start.elapsed();

        Ok(DownloadResult::success(
            url,
            filename,
            body.len() as u64,
            elapsed,
        ))
    }
}
