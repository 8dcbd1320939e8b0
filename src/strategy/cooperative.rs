use futures_util::future::join_all;
use tracing::{debug, instrument, warn};

use super::{Strategy, StrategyError, current_thread_runtime};
use crate::download::{DownloadResult, Fetcher, is_eligible, resolve_filename};

/// Runs every eligible fetch as a task on one single-threaded event loop.
///
/// Tasks interleave at the network read and the file write; a task that
/// panics is reported as a failed item and its siblings carry on.
#[derive(Debug, Clone)]
pub struct Cooperative {
    fetcher: Fetcher,
}

impl Cooperative {
    #[must_use]
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    async fn gather(&self, urls: &[String]) -> Vec<DownloadResult> {
        let mut results = Vec::with_capacity(urls.len());
        let mut pending = Vec::new();

        for url in urls {
            let filename = resolve_filename(url);
            if !is_eligible(&filename) {
                results.push(DownloadResult::skipped(url, filename));
                continue;
            }
            let fetcher = self.fetcher.clone();
            let owned_url = url.clone();
            let handle = tokio::spawn(async move { fetcher.fetch(&owned_url).await });
            pending.push((url, filename, handle));
        }

        debug!(tasks = pending.len(), "awaiting fetch tasks");

        let (meta, handles): (Vec<_>, Vec<_>) = pending
            .into_iter()
            .map(|(url, filename, handle)| ((url, filename), handle))
            .unzip();

        for ((url, filename), joined) in meta.into_iter().zip(join_all(handles).await) {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!(url = %url, error = %e, "fetch task failed");
                    results.push(DownloadResult::failed(url, filename, e.to_string()));
                }
            }
        }

        results
    }
}

impl Strategy for Cooperative {
    fn name(&self) -> &'static str {
        "async"
    }

    #[instrument(level = "debug", skip_all, fields(strategy = self.name(), urls = urls.len()))]
    fn run(&self, urls: &[String]) -> Result<Vec<DownloadResult>, StrategyError> {
        let runtime = current_thread_runtime()?;
        Ok(runtime.block_on(self.gather(urls)))
    }
}
