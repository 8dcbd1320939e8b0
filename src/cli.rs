//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser};

use imgfetch_core::strategy::{WORKER_DIR_FLAG, WORKER_FLAG};
use imgfetch_core::{DEFAULT_DOWNLOAD_DIR, StrategyKind};

/// Download .jpg images from a list of URLs.
///
/// Images are saved into the download directory, which must already exist.
/// Pick one execution mode to compare sequential, threaded, multi-process
/// and async downloading on the same input.
#[derive(Parser, Debug)]
#[command(name = "imgfetch")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// URLs to download, separated by spaces
    #[arg(short = 'u', long = "urls", num_args = 1.., value_name = "URL")]
    pub urls: Vec<String>,

    /// File with one URL per line
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Directory images are written to (must exist)
    #[arg(long = WORKER_DIR_FLAG, default_value = DEFAULT_DOWNLOAD_DIR, value_name = "DIR")]
    pub download_dir: PathBuf,

    #[command(flatten)]
    pub mode: ModeArgs,

    /// Fetch a single URL and print its result as JSON (worker process mode)
    #[arg(long = WORKER_FLAG, value_name = "URL", hide = true)]
    pub fetch_one: Option<String>,
}

/// Mutually exclusive execution modes; none selected means sequential.
#[derive(ClapArgs, Debug, Default)]
#[group(multiple = false)]
pub struct ModeArgs {
    /// Download with one thread per URL
    #[arg(short = 't', long = "threads")]
    pub threads: bool,

    /// Download with one process per URL
    #[arg(short = 'm', long = "multiprocessing")]
    pub multiprocessing: bool,

    /// Download with async tasks on a single-threaded event loop
    #[arg(short = 'a', long = "async")]
    pub async_mode: bool,
}

impl ModeArgs {
    /// Returns the selected strategy (sequential by default).
    #[must_use]
    pub fn strategy(&self) -> StrategyKind {
        if self.threads {
            StrategyKind::Threads
        } else if self.multiprocessing {
            StrategyKind::Processes
        } else if self.async_mode {
            StrategyKind::Async
        } else {
            StrategyKind::default()
        }
    }
}

impl Args {
    /// Returns the log filter implied by the verbosity flags.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgfetch_core::ProcessPool;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["imgfetch"]).unwrap();
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert!(args.urls.is_empty());
        assert!(args.file.is_none());
        assert_eq!(args.download_dir, PathBuf::from("download"));
        assert_eq!(args.mode.strategy(), StrategyKind::Sequential);
        assert!(args.fetch_one.is_none());
    }

    #[test]
    fn test_cli_urls_take_multiple_values() {
        let args =
            Args::try_parse_from(["imgfetch", "-u", "http://x/a.jpg", "http://x/b.jpg"]).unwrap();
        assert_eq!(args.urls, vec!["http://x/a.jpg", "http://x/b.jpg"]);
    }

    #[test]
    fn test_cli_urls_and_file_together() {
        let args = Args::try_parse_from([
            "imgfetch",
            "--file",
            "urls.txt",
            "--urls",
            "http://x/a.jpg",
        ])
        .unwrap();
        assert_eq!(args.file, Some(PathBuf::from("urls.txt")));
        assert_eq!(args.urls.len(), 1);
    }

    #[test]
    fn test_cli_mode_flags_select_strategy() {
        let cases = [
            ("-t", StrategyKind::Threads),
            ("--threads", StrategyKind::Threads),
            ("-m", StrategyKind::Processes),
            ("--multiprocessing", StrategyKind::Processes),
            ("-a", StrategyKind::Async),
            ("--async", StrategyKind::Async),
        ];
        for (flag, expected) in cases {
            let args = Args::try_parse_from(["imgfetch", flag]).unwrap();
            assert_eq!(args.mode.strategy(), expected, "flag {flag}");
        }
    }

    #[test]
    fn test_cli_mode_flags_are_exclusive() {
        let result = Args::try_parse_from(["imgfetch", "--threads", "--async"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_cli_verbosity_maps_to_log_level() {
        let args = Args::try_parse_from(["imgfetch"]).unwrap();
        assert_eq!(args.default_log_level(), "info");
        let args = Args::try_parse_from(["imgfetch", "-vv"]).unwrap();
        assert_eq!(args.default_log_level(), "trace");
        let args = Args::try_parse_from(["imgfetch", "-v", "-q"]).unwrap();
        assert_eq!(args.default_log_level(), "error");
    }

    #[test]
    fn test_cli_accepts_worker_args() {
        let pool = ProcessPool::with_program("imgfetch", "images");
        let mut argv = vec!["imgfetch".to_string()];
        argv.extend(pool.worker_args("http://x/a.jpg"));

        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.fetch_one.as_deref(), Some("http://x/a.jpg"));
        assert_eq!(args.download_dir, PathBuf::from("images"));
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["imgfetch", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let err = Args::try_parse_from(["imgfetch", "--invalid-flag"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
