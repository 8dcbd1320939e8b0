//! Concurrency strategies for running a batch of fetches.
//!
//! Each strategy drives [`Fetcher::fetch`] once per URL and returns one
//! [`DownloadResult`] per URL, skips included. They differ only in how the
//! work is scheduled:
//!
//! | Strategy        | Model                                   | Parallelism        |
//! |-----------------|-----------------------------------------|--------------------|
//! | [`Sequential`]  | one item after another                  | 1                  |
//! | [`ThreadPool`]  | one OS thread per URL                   | batch size         |
//! | [`ProcessPool`] | one child process per URL               | batch size         |
//! | [`Cooperative`] | tasks on a single-threaded event loop   | batch size, 1 core |
//!
//! None of them bounds the number of workers. Item failures are always
//! reported as results; [`StrategyError`] is reserved for faults of the
//! strategy machinery itself.

mod cooperative;
mod process_pool;
mod sequential;
mod thread_pool;

use std::fmt;

use tokio::runtime::{Builder, Runtime};

use crate::download::{DownloadResult, Fetcher};

pub use cooperative::Cooperative;
pub use process_pool::{ProcessPool, WORKER_DIR_FLAG, WORKER_FLAG, WorkerCommand};
pub use sequential::Sequential;
pub use thread_pool::ThreadPool;

/// Error type for strategy infrastructure failures.
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    /// The tokio runtime driving the fetches could not be created.
    #[error("failed to build async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The process strategy was selected without a worker executable.
    #[error("the process strategy needs a worker executable")]
    MissingWorker,
}

/// A way of executing a batch of fetches.
///
/// `run` blocks the caller until every URL has a result. It must not be
/// called from inside an async runtime, since the in-process strategies
/// start their own.
pub trait Strategy: Send + Sync + fmt::Debug {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Fetches every URL and returns one result per URL, in no guaranteed order.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError`] only when the strategy cannot run at all.
    fn run(&self, urls: &[String]) -> Result<Vec<DownloadResult>, StrategyError>;
}

/// Selector for the available strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    /// One item at a time (default).
    #[default]
    Sequential,
    /// One OS thread per URL.
    Threads,
    /// One child process per URL.
    Processes,
    /// Cooperative tasks on a single-threaded event loop.
    Async,
}

impl StrategyKind {
    /// Returns the selector name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Sequential => "sequential",
            StrategyKind::Threads => "threads",
            StrategyKind::Processes => "processes",
            StrategyKind::Async => "async",
        }
    }

    /// Builds the strategy around `fetcher`.
    ///
    /// `worker` is only used by [`StrategyKind::Processes`], which runs it
    /// once per URL; the other kinds ignore it.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError::MissingWorker`] if the process strategy is
    /// selected without a worker.
    pub fn build(
        self,
        fetcher: Fetcher,
        worker: Option<WorkerCommand>,
    ) -> Result<Box<dyn Strategy>, StrategyError> {
        let strategy: Box<dyn Strategy> = match self {
            StrategyKind::Sequential => Box::new(Sequential::new(fetcher)),
            StrategyKind::Threads => Box::new(ThreadPool::new(fetcher)),
            StrategyKind::Processes => {
                let worker = worker.ok_or(StrategyError::MissingWorker)?;
                Box::new(ProcessPool::new(worker, fetcher.download_dir()))
            }
            StrategyKind::Async => Box::new(Cooperative::new(fetcher)),
        };
        Ok(strategy)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the single-threaded runtime the in-process strategies drive fetches on.
pub(crate) fn current_thread_runtime() -> Result<Runtime, StrategyError> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(StrategyError::Runtime)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::download::HttpClient;

    #[test]
    fn test_strategy_kind_default_is_sequential() {
        assert_eq!(StrategyKind::default(), StrategyKind::Sequential);
    }

    #[test]
    fn test_build_returns_matching_strategy() {
        let fetcher = Fetcher::new(HttpClient::new(), "download");
        let worker = WorkerCommand::new("imgfetch");
        for kind in [
            StrategyKind::Sequential,
            StrategyKind::Threads,
            StrategyKind::Processes,
            StrategyKind::Async,
        ] {
            let strategy = kind.build(fetcher.clone(), Some(worker.clone())).unwrap();
            assert_eq!(strategy.name(), kind.as_str());
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn test_build_processes_requires_worker() {
        let fetcher = Fetcher::new(HttpClient::new(), "download");
        let err = StrategyKind::Processes.build(fetcher.clone(), None).unwrap_err();
        assert!(matches!(err, StrategyError::MissingWorker));

        // In-process strategies need no worker.
        for kind in [StrategyKind::Sequential, StrategyKind::Threads, StrategyKind::Async] {
            assert!(kind.build(fetcher.clone(), None).is_ok());
        }
    }

    #[test]
    fn test_empty_batch_yields_no_results() {
        let fetcher = Fetcher::new(HttpClient::new(), "download");
        for kind in [StrategyKind::Sequential, StrategyKind::Threads, StrategyKind::Async] {
            let strategy = kind.build(fetcher.clone(), None).unwrap();
            assert!(strategy.run(&[]).unwrap().is_empty());
        }
    }

    #[test]
    fn test_all_ineligible_batch_is_all_skips() {
        let fetcher = Fetcher::new(HttpClient::new(), "download");
        let urls = vec![
            "http://127.0.0.1:9/a.png".to_string(),
            "http://127.0.0.1:9/readme.txt".to_string(),
        ];
        for kind in [StrategyKind::Sequential, StrategyKind::Threads, StrategyKind::Async] {
            let results = kind.build(fetcher.clone(), None).unwrap().run(&urls).unwrap();
            assert_eq!(results.len(), 2);
            assert!(results.iter().all(DownloadResult::is_skipped), "{kind}");
        }
    }
}
