//! Imgfetch Core Library
//!
//! This library downloads batches of `.jpg` images from plain URL lists and
//! lets the caller pick how the batch is executed, so the cost of each
//! concurrency model can be compared on the same input.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`download`] - Filename resolution, suffix filtering and the single-item fetcher
//! - [`strategy`] - The four execution models (sequential, threads, processes, async)
//! - [`batch`] - Batch orchestration and timing reports
//! - [`input`] - Reading newline-delimited URL files

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod download;
pub mod input;
pub mod strategy;
mod user_agent;

// Re-export commonly used types
pub use batch::{BatchReport, RunSummary, run_batch, run_batches, run_batches_since};
pub use download::{
    DEFAULT_DOWNLOAD_DIR, DownloadError, DownloadResult, ELIGIBLE_SUFFIX, Fetcher, HttpClient,
    Outcome, is_eligible, resolve_filename,
};
pub use input::{InputError, read_url_file};
pub use strategy::{
    Cooperative, ProcessPool, Sequential, Strategy, StrategyError, StrategyKind, ThreadPool,
    WorkerCommand,
};
