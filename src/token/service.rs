use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::http_client::HttpTransport;
use crate::request::{BodyFormat, RequestService, TokenResolver};
use crate::token::store::{TokenCacheEntry, TokenStore};
use crate::token::wire::{
    TokenRequest, TokenResponse, TokenRevocation, GRANT_PASSWORD, GRANT_REFRESH_TOKEN,
};
use crate::MeshyError;

const TOKEN_ENDPOINT: &str = "connect/token";
const REVOCATION_ENDPOINT: &str = "connect/revocation";
const SCOPE: &str = "meshy.api offline_access";

/// Produces and refreshes access tokens against the auth endpoint.
///
/// The only component that talks to `connect/token` and `connect/revocation`.
/// Multiple identities are held at once, keyed by authentication id in the
/// injected [`TokenStore`].
pub struct TokenService<T: HttpTransport> {
    requests: RequestService<T>,
    client_id: String,
    store: TokenStore,
}

impl<T: HttpTransport> TokenService<T> {
    /// Bind a service to the auth base URL with the tenant's public key as
    /// OAuth client id. The store is injected so several clients can either
    /// share sessions or stay fully isolated.
    pub fn new(
        transport: Arc<T>,
        auth_url: &str,
        public_key: &str,
        tenant: Option<&str>,
        store: TokenStore,
    ) -> Result<Self> {
        let requests = RequestService::new(transport, auth_url, tenant.map(str::to_owned))?;
        Ok(Self {
            requests,
            client_id: public_key.to_string(),
            store,
        })
    }

    /// Exchange user credentials for a token pair via a password grant.
    ///
    /// Generates a fresh authentication id when none is supplied and returns
    /// the id the new cache entry was stored under.
    pub async fn acquire_with_password(
        &self,
        username: &str,
        password: &str,
        authentication_id: Option<&str>,
    ) -> Result<String> {
        let request = TokenRequest {
            client_id: self.client_id.clone(),
            grant_type: GRANT_PASSWORD,
            username: Some(username.to_string()),
            password: Some(password.to_string()),
            refresh_token: None,
            scope: SCOPE.to_string(),
        };
        let (id, _) = self.exchange(request, authentication_id).await?;
        Ok(id)
    }

    /// Exchange a refresh token for a fresh token pair. Used both for
    /// resuming a persisted session and internally for lazy refresh.
    pub async fn acquire_with_refresh_token(
        &self,
        refresh_token: &str,
        authentication_id: Option<&str>,
    ) -> Result<String> {
        let request = TokenRequest {
            client_id: self.client_id.clone(),
            grant_type: GRANT_REFRESH_TOKEN,
            username: None,
            password: None,
            refresh_token: Some(refresh_token.to_string()),
            scope: SCOPE.to_string(),
        };
        let (id, _) = self.exchange(request, authentication_id).await?;
        Ok(id)
    }

    /// Return a currently valid access token for the id, refreshing lazily.
    ///
    /// `None` means the id is unknown or signed out; callers proceed
    /// unauthenticated. An expired entry triggers exactly one refresh grant
    /// and is replaced wholesale under the same id. A failed refresh
    /// propagates and leaves the stale entry in place.
    ///
    /// Two callers observing the same expired id concurrently will both
    /// refresh; the entry replacement is atomic and the last write wins.
    pub async fn get_access_token(&self, authentication_id: &str) -> Result<Option<String>> {
        let Some(entry) = self.store.get(authentication_id).await else {
            return Ok(None);
        };
        if !entry.is_expired() {
            return Ok(Some(entry.access_token));
        }

        let refresh_token = entry
            .refresh_token
            .ok_or_else(|| MeshyError::MissingRefreshToken(authentication_id.to_string()))?;
        debug!(authentication_id, "cached token expired, refreshing");

        let request = TokenRequest {
            client_id: self.client_id.clone(),
            grant_type: GRANT_REFRESH_TOKEN,
            username: None,
            password: None,
            refresh_token: Some(refresh_token),
            scope: SCOPE.to_string(),
        };
        let (_, entry) = self.exchange(request, Some(authentication_id)).await?;
        Ok(Some(entry.access_token))
    }

    /// Direct read of the cached refresh token. No expiry check, no network.
    pub async fn get_refresh_token(&self, authentication_id: &str) -> Option<String> {
        if authentication_id.trim().is_empty() {
            return None;
        }
        self.store
            .get(authentication_id)
            .await
            .and_then(|entry| entry.refresh_token)
    }

    /// Revoke the cached refresh token and drop the cache entry.
    ///
    /// No-op when the id has no entry. Revocation is best effort: a failed
    /// revocation call is logged and the local entry is removed regardless,
    /// since the in-process cache is authoritative for this process.
    pub async fn sign_out(&self, authentication_id: &str) -> Result<()> {
        let Some(entry) = self.store.get(authentication_id).await else {
            return Ok(());
        };

        if let Some(refresh_token) = entry.refresh_token {
            let revocation = TokenRevocation {
                token: refresh_token,
                token_type_hint: GRANT_REFRESH_TOKEN,
                client_id: self.client_id.clone(),
            };
            if let Err(err) = self
                .requests
                .execute(
                    http::Method::POST,
                    REVOCATION_ENDPOINT,
                    Some(&revocation),
                    Some(BodyFormat::Form),
                    None,
                )
                .await
            {
                warn!(authentication_id, %err, "token revocation failed, dropping cache entry anyway");
            }
        }

        self.store.remove(authentication_id).await;
        debug!(authentication_id, "signed out");
        Ok(())
    }

    /// Run one grant exchange and store the resulting entry.
    async fn exchange(
        &self,
        request: TokenRequest,
        authentication_id: Option<&str>,
    ) -> Result<(String, TokenCacheEntry)> {
        let id = authentication_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let response: TokenResponse = self
            .requests
            .post(TOKEN_ENDPOINT, Some(&request), BodyFormat::Form, None)
            .await?;

        debug!(
            authentication_id = %id,
            grant_type = request.grant_type,
            expires_in = response.expires_in,
            "token acquired"
        );

        let entry = TokenCacheEntry::new(
            response.access_token,
            response.refresh_token,
            response.expires_in,
        );
        self.store.put(&id, entry.clone()).await;
        Ok((id, entry))
    }
}

impl<T: HttpTransport + 'static> TokenResolver for TokenService<T> {
    fn resolve<'a>(
        &'a self,
        authentication_id: &'a str,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Option<String>>> + Send + 'a>>
    {
        Box::pin(self.get_access_token(authentication_id))
    }
}
