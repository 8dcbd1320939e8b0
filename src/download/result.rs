//! Per-item outcome records.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What happened to one URL of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The body was written to disk.
    Success {
        /// Number of bytes written.
        bytes: u64,
    },
    /// The fetch or the write failed; the batch carried on.
    Failed {
        /// Human-readable failure detail (status code or fault description).
        error: String,
    },
    /// The resolved filename did not pass the suffix filter; no I/O happened.
    Skipped,
}

/// Result of fetching one URL.
///
/// `elapsed` covers only the disk write of a successful item and is zero for
/// failures and skips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadResult {
    /// The URL as supplied.
    pub url: String,
    /// Filename the URL resolved to.
    pub filename: String,
    /// Item outcome.
    pub outcome: Outcome,
    /// Time spent storing the body.
    pub elapsed: Duration,
}

impl DownloadResult {
    /// Creates a success record.
    pub fn success(
        url: impl Into<String>,
        filename: impl Into<String>,
        bytes: u64,
        elapsed: Duration,
    ) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            outcome: Outcome::Success { bytes },
            elapsed,
        }
    }

    /// Creates a failure record.
    pub fn failed(
        url: impl Into<String>,
        filename: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            outcome: Outcome::Failed {
                error: error.into(),
            },
            elapsed: Duration::ZERO,
        }
    }

    /// Creates a skip record.
    pub fn skipped(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            outcome: Outcome::Skipped,
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, Outcome::Skipped)
    }

    /// Returns the failure detail, if the item failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failed { error } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_result_predicates_are_exclusive() {
        let ok = DownloadResult::success("u", "a.jpg", 3, Duration::from_millis(2));
        let failed = DownloadResult::failed("u", "a.jpg", "HTTP 404");
        let skipped = DownloadResult::skipped("u", "c.png");

        assert!(ok.is_success() && !ok.is_failed() && !ok.is_skipped());
        assert!(failed.is_failed() && !failed.is_success() && !failed.is_skipped());
        assert!(skipped.is_skipped() && !skipped.is_success() && !skipped.is_failed());
        assert_eq!(failed.error(), Some("HTTP 404"));
        assert_eq!(ok.error(), None);
        assert_eq!(skipped.elapsed, Duration::ZERO);
    }

    #[test]
    fn test_result_json_uses_status_tag() {
        let failed = DownloadResult::failed("http://x/a.jpg", "a.jpg", "HTTP 500");
        let json = serde_json::to_string(&failed).unwrap();
        assert!(json.contains(r#""status":"failed""#), "got: {json}");

        let parsed: DownloadResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, failed);
    }
}
