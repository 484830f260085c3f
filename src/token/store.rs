use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// One cached token pair for a logged-in identity.
///
/// Entries are created whole on a successful grant and replaced whole on
/// refresh; no field is ever updated in isolation.
#[derive(Debug, Clone)]
pub struct TokenCacheEntry {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl TokenCacheEntry {
    /// Build an entry from a grant response, deriving the absolute expiry
    /// from the server-reported lifetime in seconds. A lifetime outside the
    /// representable range clamps to the matching epoch bound; server input
    /// must not be able to panic the cache.
    pub fn new(access_token: String, refresh_token: Option<String>, expires_in: i64) -> Self {
        let expires_at = Duration::try_seconds(expires_in)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .unwrap_or(if expires_in < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            });
        Self {
            access_token,
            refresh_token,
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// In-memory map from authentication id to its cached token pair.
///
/// Cloning yields another handle onto the same map, so independent services
/// constructed from one store observe the same sessions. The store does no
/// expiry checking; that policy lives in [`TokenService`](crate::TokenService).
///
/// Never persisted. A caller wanting sessions to survive a restart persists
/// the refresh token itself and resumes with a refresh-token login.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<HashMap<String, TokenCacheEntry>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the entry for an id, expired or not.
    pub async fn get(&self, authentication_id: &str) -> Option<TokenCacheEntry> {
        let map = self.inner.read().await;
        map.get(authentication_id).cloned()
    }

    /// Insert or overwrite the entry for an id.
    pub async fn put(&self, authentication_id: &str, entry: TokenCacheEntry) {
        let mut map = self.inner.write().await;
        map.insert(authentication_id.to_string(), entry);
    }

    /// Remove the entry for an id. No-op when absent.
    pub async fn remove(&self, authentication_id: &str) {
        let mut map = self.inner.write().await;
        map.remove(authentication_id);
    }
}
