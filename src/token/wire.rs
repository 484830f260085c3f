//! Wire representations of the OAuth-style grant and revocation exchanges.
//! Ephemeral only; nothing here is cached.

use serde::{Deserialize, Serialize};

pub(crate) const GRANT_PASSWORD: &str = "password";
pub(crate) const GRANT_REFRESH_TOKEN: &str = "refresh_token";

/// Form-encoded body for `connect/token`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct TokenRequest {
    pub client_id: String,
    pub grant_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub scope: String,
}

/// JSON body returned by `connect/token`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Form-encoded body for `connect/revocation`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct TokenRevocation {
    pub token: String,
    pub token_type_hint: &'static str,
    pub client_id: String,
}
