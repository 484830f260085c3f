use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload for registering a new user. Field list intentionally minimal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    pub username: String,
    pub new_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

impl RegisterUser {
    pub fn new(username: &str, new_password: &str) -> Self {
        Self {
            username: username.to_string(),
            new_password: new_password.to_string(),
            email_address: None,
        }
    }
}

/// A user as returned by the registration endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub username: String,
    #[serde(default)]
    pub email_address: Option<String>,
}

/// Opaque reset grant issued by the forgot-password endpoint. The caller
/// hands it back, together with the new password, to complete the reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetHash {
    pub username: String,
    pub attempt: i32,
    pub hash: String,
    pub expires: DateTime<Utc>,
}

/// Completion payload for a password reset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPassword {
    #[serde(flatten)]
    pub reset: PasswordResetHash,
    pub new_password: String,
}

/// Payload for changing the password of the authenticated user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPasswordUpdate {
    pub previous_password: String,
    pub new_password: String,
}

/// Payload for requesting a password reset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPassword {
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterAnonymousUser {
    pub username: String,
}
