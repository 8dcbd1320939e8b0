//! HTTP client wrapper for fetching image bodies.

use reqwest::{Client, ClientBuilder, StatusCode};
use tracing::{debug, instrument};

use super::error::DownloadError;
use crate::user_agent;

/// HTTP client shared by every item of a batch.
///
/// Idle connections are not pooled: the threaded strategies drive the same
/// client from several short-lived runtimes, and a pooled connection must not
/// outlive the runtime that opened it. No request timeout is set; an
/// unresponsive server blocks its item until the connection drops.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let client = build_client().expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Issues a GET request and returns the full body of a 200 response.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::HttpStatus`] for any status other than 200,
    /// and [`DownloadError::Network`] when the request or the body read fails.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(status = status.as_u16(), "non-200 response");
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DownloadError::network(url, e))?;
        debug!(bytes = body.len(), "response body read");
        Ok(body.to_vec())
    }
}

fn build_client() -> Result<Client, reqwest::Error> {
    ClientBuilder::new()
        .user_agent(user_agent::default_user_agent())
        .pool_max_idle_per_host(0)
        .gzip(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_builds() {
        let client = HttpClient::new();
        let cloned = client.clone();
        assert!(format!("{cloned:?}").contains("HttpClient"));
    }

    #[tokio::test]
    async fn test_get_bytes_connection_refused_is_network_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = HttpClient::new();
        let result = client.get_bytes("http://127.0.0.1:9/a.jpg").await;
        assert!(matches!(result, Err(DownloadError::Network { .. })));
    }
}
