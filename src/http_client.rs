//! The transport seam between the SDK and whatever HTTP stack drives it.
//!
//! The request layer assembles a complete [`HttpRequest`] (URL already
//! validated, headers and body already encoded) and hands it to an
//! [`HttpTransport`]. Cancellation and timeouts are transport concerns.

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use std::future::Future;

use crate::error::TransportError;

/// One fully assembled outbound call.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// A bodiless request; the request layer fills headers and body in
    /// before dispatch.
    pub fn new(method: Method, url: String) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

/// The raw answer a transport hands back. Status interpretation and body
/// decoding stay with the request layer.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Trait for pluggable HTTP transports.
pub trait HttpTransport: Send + Sync {
    /// Send a request and return the raw response.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}
