//! Error types for the download module.
//!
//! These errors never escape a batch: the fetcher renders them into the
//! `Failed` outcome of the item they belong to.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching and storing one image.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Any response other than 200 OK.
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that returned the status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error while storing the image.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// No `From<reqwest::Error>` / `From<std::io::Error>`: every variant needs the
// url or path that the source error does not carry.
