use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, Method};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::debug;

use crate::error::{MeshyError, Result};
use crate::http_client::{HttpRequest, HttpResponse, HttpTransport};

/// Header carrying the tenant partition on every call.
pub(crate) const TENANT_HEADER: HeaderName = HeaderName::from_static("tenant");

/// How a request body goes over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    /// `application/json`. The default for API calls; serde skip attributes
    /// on the model hide server-assigned fields such as ids on create.
    Json,
    /// `application/x-www-form-urlencoded`, `key=value` pairs joined by `&`.
    /// Only the OAuth-style token and revocation endpoints use this.
    Form,
}

/// Resolves the current bearer token for an authentication id.
///
/// Implemented by [`TokenService`](crate::TokenService); the request layer
/// only sees this seam, so tests can substitute a fixed token.
pub trait TokenResolver: Send + Sync {
    fn resolve<'a>(
        &'a self,
        authentication_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>>> + Send + 'a>>;
}

struct TokenBinding {
    resolver: Arc<dyn TokenResolver>,
    authentication_id: String,
}

/// Builds and dispatches one HTTP call per method invocation.
///
/// Injects the bearer token (resolved lazily through the [`TokenResolver`])
/// and the tenant header, serializes bodies as JSON or form data, and decodes
/// JSON responses. No retries; transport failures propagate unchanged.
pub struct RequestService<T: HttpTransport> {
    transport: Arc<T>,
    base_url: String,
    tenant: Option<String>,
    tokens: Option<TokenBinding>,
}

impl<T: HttpTransport> Clone for RequestService<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            base_url: self.base_url.clone(),
            tenant: self.tenant.clone(),
            tokens: self.tokens.as_ref().map(|binding| TokenBinding {
                resolver: Arc::clone(&binding.resolver),
                authentication_id: binding.authentication_id.clone(),
            }),
        }
    }
}

impl<T: HttpTransport> RequestService<T> {
    /// Bind a service to a base URL. Fails fast when the base itself is not
    /// a valid absolute URL; no call is ever attempted against it.
    pub fn new(transport: Arc<T>, base_url: &str, tenant: Option<String>) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|_| MeshyError::Url(base_url.clone()))?;
        Ok(Self {
            transport,
            base_url,
            tenant,
            tokens: None,
        })
    }

    /// A copy of this service whose calls authenticate as the given id.
    pub fn with_authentication(
        &self,
        resolver: Arc<dyn TokenResolver>,
        authentication_id: &str,
    ) -> Self {
        let mut service = self.clone();
        service.tokens = Some(TokenBinding {
            resolver,
            authentication_id: authentication_id.to_string(),
        });
        service
    }

    pub async fn get<R>(&self, path: &str, overrides: Option<HeaderMap>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = self
            .execute::<()>(Method::GET, path, None, None, overrides)
            .await?;
        decode(&response)
    }

    pub async fn delete<R>(&self, path: &str, overrides: Option<HeaderMap>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = self
            .execute::<()>(Method::DELETE, path, None, None, overrides)
            .await?;
        decode(&response)
    }

    pub async fn delete_with_body<R, B>(
        &self,
        path: &str,
        body: Option<&B>,
        format: BodyFormat,
        overrides: Option<HeaderMap>,
    ) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize,
    {
        let response = self
            .execute(Method::DELETE, path, body, Some(format), overrides)
            .await?;
        decode(&response)
    }

    pub async fn put<R, B>(
        &self,
        path: &str,
        body: Option<&B>,
        format: BodyFormat,
        overrides: Option<HeaderMap>,
    ) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize,
    {
        let response = self
            .execute(Method::PUT, path, body, Some(format), overrides)
            .await?;
        decode(&response)
    }

    pub async fn post<R, B>(
        &self,
        path: &str,
        body: Option<&B>,
        format: BodyFormat,
        overrides: Option<HeaderMap>,
    ) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize,
    {
        let response = self
            .execute(Method::POST, path, body, Some(format), overrides)
            .await?;
        decode(&response)
    }

    /// Build, authenticate and dispatch one call, returning the raw response.
    ///
    /// Header precedence: resolved bearer token first, then the tenant
    /// header, then the body content type, and caller overrides last. An
    /// absent or blank token simply omits the `Authorization` header.
    /// Non-success statuses become [`MeshyError::Api`].
    pub async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        format: Option<BodyFormat>,
        overrides: Option<HeaderMap>,
    ) -> Result<HttpResponse>
    where
        B: Serialize,
    {
        let mut request = HttpRequest::new(method, self.build_url(path)?);

        let content_type = match format {
            None => None,
            Some(BodyFormat::Json) => {
                // Serializing the Option directly turns a null model into JSON `null`.
                let encoded =
                    serde_json::to_vec(&body).map_err(|err| MeshyError::Encode(err.to_string()))?;
                request.body = Some(Bytes::from(encoded));
                Some("application/json")
            }
            Some(BodyFormat::Form) => {
                let encoded = match body {
                    Some(model) => serde_urlencoded::to_string(model)
                        .map_err(|err| MeshyError::Encode(err.to_string()))?,
                    None => String::new(),
                };
                request.body = Some(Bytes::from(encoded.into_bytes()));
                Some("application/x-www-form-urlencoded")
            }
        };

        if let Some(binding) = &self.tokens {
            if let Some(token) = binding.resolver.resolve(&binding.authentication_id).await? {
                if !token.trim().is_empty() {
                    let value = HeaderValue::from_str(&format!("Bearer {token}"))
                        .map_err(|err| MeshyError::Encode(err.to_string()))?;
                    request.headers.insert(AUTHORIZATION, value);
                }
            }
        }
        if let Some(tenant) = &self.tenant {
            let value = HeaderValue::from_str(tenant)
                .map_err(|err| MeshyError::Encode(err.to_string()))?;
            request.headers.insert(TENANT_HEADER, value);
        }
        if let Some(content_type) = content_type {
            request
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        // Caller overrides win over everything set above.
        if let Some(overrides) = overrides {
            for (name, value) in overrides.iter() {
                request.headers.insert(name, value.clone());
            }
        }

        debug!(method = %request.method, url = %request.url, "dispatching request");
        let response = self.transport.send(request).await?;

        if !response.status.is_success() {
            return Err(MeshyError::Api {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }
        Ok(response)
    }

    /// Join base and path, failing fast when the result is not an absolute URL.
    fn build_url(&self, path: &str) -> Result<String> {
        let full = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&full).map_err(|_| MeshyError::Url(full.clone()))?;
        Ok(full)
    }
}

/// Decode a JSON response body. An empty body decodes like JSON `null`,
/// which covers endpoints answering 2xx with no content.
fn decode<R: DeserializeOwned>(response: &HttpResponse) -> Result<R> {
    if response.body.is_empty() {
        serde_json::from_slice(b"null").map_err(MeshyError::from)
    } else {
        serde_json::from_slice(&response.body).map_err(MeshyError::from)
    }
}
