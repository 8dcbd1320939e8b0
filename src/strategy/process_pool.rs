use std::ffi::OsStr;
use std::io;
use std::path::PathBuf;
use std::process::{Child, Command, Output, Stdio};

use tracing::{debug, instrument, warn};

use super::{Strategy, StrategyError};
use crate::download::{DownloadResult, resolve_filename};

/// Long flag (without dashes) that switches the worker executable into single-fetch mode.
pub const WORKER_FLAG: &str = "fetch-one";

/// Long flag (without dashes) carrying the download directory to a worker.
pub const WORKER_DIR_FLAG: &str = "download-dir";

/// The executable a [`ProcessPool`] starts for each URL.
///
/// The program must accept `--fetch-one=<url> --download-dir <dir>`, fetch
/// that one URL and print its [`DownloadResult`] as a single JSON line on
/// stdout. The `imgfetch` binary does this; a host program embedding the
/// library has to point at it (or at an equivalent) explicitly.
#[derive(Debug, Clone)]
pub struct WorkerCommand {
    program: PathBuf,
    log_filter: Option<String>,
}

impl WorkerCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            log_filter: None,
        }
    }

    /// Sets the `RUST_LOG` filter passed to every worker.
    #[must_use]
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }
}

/// Spawns one worker process per URL and waits for all of them.
///
/// Worker stderr is inherited so per-item log lines reach the terminal. A
/// worker that cannot be spawned, crashes, or prints no result only fails its
/// own URL.
#[derive(Debug, Clone)]
pub struct ProcessPool {
    worker: WorkerCommand,
    download_dir: PathBuf,
}

impl ProcessPool {
    /// Creates a pool running `worker` for every URL.
    pub fn new(worker: WorkerCommand, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            worker,
            download_dir: download_dir.into(),
        }
    }

    /// Creates a pool that runs `program` as the worker executable.
    pub fn with_program(program: impl Into<PathBuf>, download_dir: impl Into<PathBuf>) -> Self {
        Self::new(WorkerCommand::new(program), download_dir)
    }

    /// Returns the arguments a worker is started with for `url`.
    #[must_use]
    pub fn worker_args(&self, url: &str) -> Vec<String> {
        vec![
            // `=` keeps URLs that start with '-' from parsing as flags.
            format!("--{WORKER_FLAG}={url}"),
            format!("--{WORKER_DIR_FLAG}"),
            self.download_dir.to_string_lossy().into_owned(),
        ]
    }

    fn spawn_worker(&self, url: &str) -> io::Result<Child> {
        let mut command = Command::new(&self.worker.program);
        command
            .args(self.worker_args(url))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        if let Some(filter) = &self.worker.log_filter {
            command.env("RUST_LOG", OsStr::new(filter));
        }
        command.spawn()
    }
}

impl Strategy for ProcessPool {
    fn name(&self) -> &'static str {
        "processes"
    }

    #[instrument(level = "debug", skip_all, fields(strategy = self.name(), urls = urls.len()))]
    fn run(&self, urls: &[String]) -> Result<Vec<DownloadResult>, StrategyError> {
        let workers: Vec<(&String, io::Result<Child>)> = urls
            .iter()
            .map(|url| (url, self.spawn_worker(url)))
            .collect();

        debug!(
            program = %self.worker.program.display(),
            workers = workers.len(),
            "waiting for worker processes"
        );

        let results = workers
            .into_iter()
            .map(|(url, child)| {
                let output = child.and_then(Child::wait_with_output);
                collect_worker_result(url, output)
            })
            .collect();
        Ok(results)
    }
}

fn collect_worker_result(url: &str, output: io::Result<Output>) -> DownloadResult {
    let output = match output {
        Ok(output) => output,
        Err(e) => {
            warn!(url = %url, error = %e, "worker process failed to run");
            return DownloadResult::failed(
                url,
                resolve_filename(url),
                format!("worker process failed to run: {e}"),
            );
        }
    };

    match parse_worker_output(&output.stdout) {
        Some(result) => result,
        None => {
            warn!(url = %url, status = %output.status, "worker process produced no result");
            DownloadResult::failed(
                url,
                resolve_filename(url),
                format!("worker process exited with {} without a result", output.status),
            )
        }
    }
}

/// Parses the last non-empty stdout line of a worker as its result.
fn parse_worker_output(stdout: &[u8]) -> Option<DownloadResult> {
    let text = String::from_utf8_lossy(stdout);
    let line = text.lines().rev().find(|line| !line.trim().is_empty())?;
    serde_json::from_str(line.trim()).ok()
}
