//! Reqwest-based HTTP transport.

use std::time::Duration;

use crate::error::TransportError;
use crate::http_client::{HttpRequest, HttpResponse, HttpTransport};

/// An [`HttpTransport`] implementation backed by [`reqwest`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the given request timeout.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Create a transport from an existing [`reqwest::Client`], for callers
    /// that need proxy, TLS or pooling settings of their own.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Sort a reqwest failure into the SDK's transport taxonomy, keeping the
    /// target URL so multi-endpoint callers can tell auth from API failures.
    fn classify(url: &str, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                url: url.to_string(),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                url: url.to_string(),
                reason: err.to_string(),
            }
        } else {
            TransportError::Other(Box::new(err))
        }
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url;
        let mut builder = self
            .client
            .request(request.method, &url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| Self::classify(&url, err))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|err| Self::classify(&url, err))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
