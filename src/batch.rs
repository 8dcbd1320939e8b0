//! Batch orchestration: run a strategy over URL lists and time it.
//!
//! # Example
//!
//! ```no_run
//! use imgfetch_core::{Fetcher, HttpClient, StrategyKind, run_batch};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Fetcher::new(HttpClient::new(), "./download");
//! let strategy = StrategyKind::Threads.build(fetcher, None)?;
//! let urls = vec!["https://example.com/cat.jpg".to_string()];
//! let report = run_batch(&urls, strategy.as_ref())?;
//! println!("{} ok in {:.2} sec.", report.succeeded(), report.elapsed.as_secs_f64());
//! # Ok(())
//! # }
//! ```

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};

use crate::download::DownloadResult;
use crate::strategy::{Strategy, StrategyError};

/// Outcome of one batch run under one strategy.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Name of the strategy that ran the batch.
    pub strategy: &'static str,
    /// One result per input URL, in completion-independent order.
    pub results: Vec<DownloadResult>,
    /// Wall-clock time from dispatch of the first item to completion of the last.
    pub elapsed: Duration,
}

impl BatchReport {
    /// Number of items written to disk.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of eligible items that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.is_failed()).count()
    }

    /// Number of items skipped by the suffix filter.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.results.iter().filter(|r| r.is_skipped()).count()
    }

    /// Number of fetch attempts (everything that was not skipped).
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.succeeded() + self.failed()
    }

    /// Total number of items in the batch.
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }
}

/// Outcome of every batch of one invocation.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Reports in the order the batches ran.
    pub batches: Vec<BatchReport>,
    /// Wall-clock time across all batches.
    pub elapsed: Duration,
}

impl RunSummary {
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.batches.iter().map(BatchReport::succeeded).sum()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.batches.iter().map(BatchReport::failed).sum()
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.batches.iter().map(BatchReport::skipped).sum()
    }
}

/// Runs one batch and returns once every item has a result.
///
/// Item failures never make this fail.
///
/// # Errors
///
/// Returns [`StrategyError`] if the strategy itself cannot run.
#[instrument(skip_all, fields(strategy = strategy.name(), urls = urls.len()))]
pub fn run_batch(urls: &[String], strategy: &dyn Strategy) -> Result<BatchReport, StrategyError> {
    debug!("starting batch");
    let start = Instant::now();
    let results = strategy.run(urls)?;
    let elapsed = start.elapsed();

    let report = BatchReport {
        strategy: strategy.name(),
        results,
        elapsed,
    };
    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        skipped = report.skipped(),
        elapsed_ms = elapsed.as_millis(),
        "batch complete"
    );
    Ok(report)
}

/// Runs each batch back-to-back under the same strategy.
///
/// Batches are never merged: each gets its own [`BatchReport`], and the
/// summary's elapsed time spans all of them.
///
/// # Errors
///
/// Returns the first [`StrategyError`]; later batches are not started.
pub fn run_batches(
    batches: &[Vec<String>],
    strategy: &dyn Strategy,
) -> Result<RunSummary, StrategyError> {
    run_batches_since(Instant::now(), batches, strategy)
}

/// Like [`run_batches`], but the summary's elapsed time counts from `started`.
///
/// Lets a caller include its own preparation, such as reading the URL file,
/// in the reported total.
///
/// # Errors
///
/// Returns the first [`StrategyError`]; later batches are not started.
pub fn run_batches_since(
    started: Instant,
    batches: &[Vec<String>],
    strategy: &dyn Strategy,
) -> Result<RunSummary, StrategyError> {
    let reports = batches
        .iter()
        .map(|urls| run_batch(urls, strategy))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RunSummary {
        batches: reports,
        elapsed: started.elapsed(),
    })
}
