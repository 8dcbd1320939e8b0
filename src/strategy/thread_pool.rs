use std::thread::{self, JoinHandle};

use tracing::{debug, instrument, warn};

use super::{Strategy, StrategyError, current_thread_runtime};
use crate::download::{DownloadResult, Fetcher, resolve_filename};

/// Spawns one OS thread per URL and joins them all.
///
/// Each thread drives its own current-thread runtime, so the fetches run in
/// true parallel. The number of threads equals the batch size.
#[derive(Debug, Clone)]
pub struct ThreadPool {
    fetcher: Fetcher,
}

impl ThreadPool {
    #[must_use]
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }
}

impl Strategy for ThreadPool {
    fn name(&self) -> &'static str {
        "threads"
    }

    #[instrument(level = "debug", skip_all, fields(strategy = self.name(), urls = urls.len()))]
    fn run(&self, urls: &[String]) -> Result<Vec<DownloadResult>, StrategyError> {
        let mut handles: Vec<(&String, Option<JoinHandle<DownloadResult>>)> =
            Vec::with_capacity(urls.len());

        for (index, url) in urls.iter().enumerate() {
            let fetcher = self.fetcher.clone();
            let owned_url = url.clone();
            let spawned = thread::Builder::new()
                .name(format!("fetch-{index}"))
                .spawn(move || fetch_on_own_runtime(&fetcher, &owned_url));

            match spawned {
                Ok(handle) => handles.push((url, Some(handle))),
                Err(e) => {
                    warn!(url = %url, error = %e, "failed to spawn fetch thread");
                    handles.push((url, None));
                }
            }
        }

        debug!(threads = handles.len(), "waiting for fetch threads");

        let results = handles
            .into_iter()
            .map(|(url, handle)| match handle.map(JoinHandle::join) {
                Some(Ok(result)) => result,
                Some(Err(_)) => {
                    warn!(url = %url, "fetch thread panicked");
                    DownloadResult::failed(url, resolve_filename(url), "fetch thread panicked")
                }
                None => DownloadResult::failed(
                    url,
                    resolve_filename(url),
                    "failed to spawn fetch thread",
                ),
            })
            .collect();
        Ok(results)
    }
}

fn fetch_on_own_runtime(fetcher: &Fetcher, url: &str) -> DownloadResult {
    match current_thread_runtime() {
        Ok(runtime) => runtime.block_on(fetcher.fetch(url)),
        Err(e) => DownloadResult::failed(url, resolve_filename(url), e.to_string()),
    }
}
