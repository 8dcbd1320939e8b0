use tracing::{debug, instrument};

use super::{Strategy, StrategyError, current_thread_runtime};
use crate::download::{DownloadResult, Fetcher};

/// Fetches one URL at a time on the caller's thread.
#[derive(Debug, Clone)]
pub struct Sequential {
    fetcher: Fetcher,
}

impl Sequential {
    #[must_use]
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }
}

impl Strategy for Sequential {
    fn name(&self) -> &'static str {
        "sequential"
    }

    #[instrument(level = "debug", skip_all, fields(strategy = self.name(), urls = urls.len()))]
    fn run(&self, urls: &[String]) -> Result<Vec<DownloadResult>, StrategyError> {
        let runtime = current_thread_runtime()?;
        let results = urls
            .iter()
            .map(|url| runtime.block_on(self.fetcher.fetch(url)))
            .collect::<Vec<_>>();
        debug!(results = results.len(), "sequential run finished");
        Ok(results)
    }
}
