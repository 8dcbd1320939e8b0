//! CLI output formatting.

use std::time::Duration;

use imgfetch_core::{DownloadResult, RunSummary};

/// Formats the final execution-time line.
pub(crate) fn execute_time_line(elapsed: Duration) -> String {
    format!("Execute time: {:.2} sec.", elapsed.as_secs_f64())
}

/// Prints the final summary to stdout.
pub(crate) fn print_summary(summary: &RunSummary) {
    println!("{}", execute_time_line(summary.elapsed));
}

/// Serialises a worker result as one JSON line.
pub(crate) fn worker_result_line(result: &DownloadResult) -> serde_json::Result<String> {
    serde_json::to_string(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_time_line_two_decimals() {
        assert_eq!(
            execute_time_line(Duration::from_millis(1234)),
            "Execute time: 1.23 sec."
        );
        assert_eq!(execute_time_line(Duration::ZERO), "Execute time: 0.00 sec.");
    }

    #[test]
    fn test_worker_result_line_is_single_line() {
        let result = DownloadResult::failed("http://x/a.jpg", "a.jpg", "HTTP 404\ndetail");
        let line = worker_result_line(&result).unwrap();
        assert!(!line.contains('\n'));
    }
}
