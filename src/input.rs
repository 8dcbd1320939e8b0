//! Reading URL lists from files.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a URL file.
#[derive(Debug, Error)]
pub enum InputError {
    /// The file could not be read.
    #[error("failed to read URL file {path}: {source}")]
    Read {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Reads a newline-delimited URL file.
///
/// Lines are split on `\n` and kept verbatim: a trailing newline yields a
/// final empty entry and `\r` is not stripped. Such entries never pass the
/// suffix filter, so they surface as skips.
///
/// # Errors
///
/// Returns [`InputError::Read`] if the file cannot be read as UTF-8 text.
pub fn read_url_file(path: &Path) -> Result<Vec<String>, InputError> {
    let text = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let urls: Vec<String> = split_url_list(&text);
    debug!(path = %path.display(), urls = urls.len(), "read URL file");
    Ok(urls)
}

/// Splits URL text on newlines without trimming.
#[must_use]
pub fn split_url_list(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_split_url_list_plain_split() {
        assert_eq!(
            split_url_list("http://x/a.jpg\nhttp://x/b.jpg\n"),
            vec![
                "http://x/a.jpg".to_string(),
                "http://x/b.jpg".to_string(),
                String::new()
            ]
        );
    }

    #[test]
    fn test_split_url_list_keeps_carriage_returns() {
        assert_eq!(
            split_url_list("http://x/a.jpg\r\n"),
            vec!["http://x/a.jpg\r".to_string(), String::new()]
        );
    }

    #[test]
    fn test_read_url_file_reads_lines() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("urls.txt");
        std::fs::write(&path, "http://x/a.jpg\nhttp://x/c.png").unwrap();

        let urls = read_url_file(&path).unwrap();
        assert_eq!(urls, vec!["http://x/a.jpg", "http://x/c.png"]);
    }

    #[test]
    fn test_read_url_file_missing_file_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.txt");
        let err = read_url_file(&path).unwrap_err();
        assert!(err.to_string().contains("absent.txt"));
    }
}
