//! The network seam under `ApiClient`.
//!
//! A transport only moves bytes: any HTTP status, 401 included, is a
//! successful outcome here. Authentication handling lives in the client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::{ApiError, ApiResponse, RequestDescriptor};

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Transmit one request. Errors only when no response was received.
    async fn execute(&self, request: &RequestDescriptor) -> Result<ApiResponse, ApiError>;
}

/// reqwest-backed transport.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: Self::parse_base_url(base_url)?,
        })
    }

    /// Parse the base URL, forcing a trailing slash so relative paths join
    /// underneath it instead of replacing its last segment.
    fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
        let normalised = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        Url::parse(&normalised)
            .map_err(|e| ApiError::Transport(format!("invalid base URL {}: {}", base_url, e)))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Transport(format!("invalid request path {}: {}", path, e)))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &RequestDescriptor) -> Result<ApiResponse, ApiError> {
        let url = self.url_for(&request.path)?;
        debug!(method = request.method.as_str(), url = %url, "Sending request");

        let mut builder = self
            .client
            .request(request.method.into(), url)
            .headers(request.headers.clone());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        debug!(status, bytes = body.len(), "Received response");
        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_under_base() {
        let transport =
            HttpTransport::new("http://127.0.0.1:8000/api", Duration::from_secs(DEFAULT_TIMEOUT_SECS)).unwrap();
        assert_eq!(transport.base_url().as_str(), "http://127.0.0.1:8000/api/");
        assert_eq!(
            transport.url_for("transactions/").unwrap().as_str(),
            "http://127.0.0.1:8000/api/transactions/"
        );
        assert_eq!(
            transport.url_for("/login/refresh/").unwrap().as_str(),
            "http://127.0.0.1:8000/api/login/refresh/"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpTransport::new("not a url", Duration::from_secs(1)),
            Err(ApiError::Transport(_))
        ));
    }
}
