//! CLI entry point for imgfetch.

use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use imgfetch_core::{
    Fetcher, HttpClient, StrategyKind, WorkerCommand, read_url_file, run_batches_since,
};
use tracing::{debug, info};

mod cli;
mod output;
mod terminal;

use cli::Args;

fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    let default_level = args.default_log_level();
    terminal::init_tracing(default_level);
    debug!(?args, "CLI arguments parsed");

    let fetcher = Fetcher::new(HttpClient::new(), &args.download_dir);

    if let Some(url) = args.fetch_one.as_deref() {
        return run_worker(&fetcher, url);
    }

    // The reported total includes reading the URL file.
    let started = Instant::now();

    // File batch first, then direct URLs; each runs as its own batch.
    let mut batches = Vec::new();
    if let Some(path) = &args.file {
        batches.push(read_url_file(path)?);
    }
    if !args.urls.is_empty() {
        batches.push(args.urls.clone());
    }
    if batches.is_empty() {
        bail!("no URLs supplied: pass --urls <URL>... and/or --file <PATH>");
    }

    let kind = args.mode.strategy();
    let worker = if kind == StrategyKind::Processes {
        let program = std::env::current_exe().context("failed to locate worker executable")?;
        let filter = terminal::worker_log_filter(std::env::var("RUST_LOG").ok(), default_level);
        Some(WorkerCommand::new(program).log_filter(filter))
    } else {
        None
    };
    let strategy = kind.build(fetcher, worker)?;
    info!(strategy = %kind, batches = batches.len(), "imgfetch starting");

    let summary = run_batches_since(started, &batches, strategy.as_ref())?;

    info!(
        succeeded = summary.succeeded(),
        failed = summary.failed(),
        skipped = summary.skipped(),
        "all batches complete"
    );
    output::print_summary(&summary);

    Ok(())
}

/// Worker process mode: fetch one URL and report it on stdout.
fn run_worker(fetcher: &Fetcher, url: &str) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build worker runtime")?;
    let result = runtime.block_on(fetcher.fetch(url));
    println!("{}", output::worker_result_line(&result)?);
    Ok(())
}
