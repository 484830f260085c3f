use http::StatusCode;
use thiserror::Error;

/// Failure surface of the underlying HTTP transport. Timeouts and connection
/// failures carry the target URL so callers can tell endpoints apart.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("connection to {url} failed: {reason}")]
    Connection { url: String, reason: String },
    #[error("transport error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// All errors surfaced by the SDK.
#[derive(Debug, Error)]
pub enum MeshyError {
    /// A required argument was blank or otherwise unusable. Raised before any I/O.
    #[error("invalid argument `{param}`: {reason}")]
    InvalidArgument { param: &'static str, reason: String },

    /// The configured base URL plus the request path did not form a valid absolute URL.
    #[error("invalid request url `{0}`")]
    Url(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-success status.
    #[error("api request failed with status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("failed to encode request: {0}")]
    Encode(String),

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// An expired cache entry had no refresh token to renew it with.
    #[error("no refresh token cached for authentication id `{0}`")]
    MissingRefreshToken(String),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MeshyError>;

/// Fail-fast check used on user-supplied parameters before any network call.
pub(crate) fn require_non_blank(param: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MeshyError::InvalidArgument {
            param,
            reason: "must not be blank".to_string(),
        });
    }
    Ok(())
}
