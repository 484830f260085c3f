use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::auth::models::{
    ForgotPassword, PasswordResetHash, RegisterAnonymousUser, RegisterUser, ResetPassword,
    UserPasswordUpdate, UserResponse,
};
use crate::error::{require_non_blank, Result};
use crate::http_client::HttpTransport;
use crate::request::{BodyFormat, RequestService, TokenResolver};
use crate::token::TokenService;

const USERS_ENDPOINT: &str = "users";
const ANONYMOUS_ENDPOINT: &str = "users/register/anonymous";
const FORGOT_PASSWORD_ENDPOINT: &str = "users/forgotpassword";
const RESET_PASSWORD_ENDPOINT: &str = "users/resetpassword";
const MY_PASSWORD_ENDPOINT: &str = "users/me/password";

/// Anonymous accounts authenticate with this fixed sentinel; the server
/// trusts the anonymous-registration step, not the password.
const ANONYMOUS_PASSWORD: &str = "nopassword";

/// Login, registration and password flows composed from the token service
/// and an auth-endpoint-bound request service.
pub struct AuthenticationService<T: HttpTransport> {
    tokens: Arc<TokenService<T>>,
    requests: RequestService<T>,
}

impl<T: HttpTransport> Clone for AuthenticationService<T> {
    fn clone(&self) -> Self {
        Self {
            tokens: Arc::clone(&self.tokens),
            requests: self.requests.clone(),
        }
    }
}

impl<T: HttpTransport + 'static> AuthenticationService<T> {
    pub fn new(tokens: Arc<TokenService<T>>, requests: RequestService<T>) -> Self {
        Self { tokens, requests }
    }

    /// Register a throwaway identity and log it in.
    ///
    /// The username is generated when absent, so repeated calls yield
    /// distinct identities. Returns the authentication id of the session.
    pub async fn login_anonymously(&self, username: Option<&str>) -> Result<String> {
        let username = username
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let registration = RegisterAnonymousUser {
            username: username.clone(),
        };
        let _: UserResponse = self
            .requests
            .post(ANONYMOUS_ENDPOINT, Some(&registration), BodyFormat::Json, None)
            .await?;
        debug!(%username, "anonymous user registered");

        self.tokens
            .acquire_with_password(&username, ANONYMOUS_PASSWORD, None)
            .await
    }

    /// Log in with user credentials via the password grant.
    pub async fn login_with_password(&self, username: &str, password: &str) -> Result<String> {
        self.tokens
            .acquire_with_password(username, password, None)
            .await
    }

    /// Resume a previously persisted session from its refresh token.
    pub async fn login_with_refresh_token(&self, refresh_token: &str) -> Result<String> {
        self.tokens
            .acquire_with_refresh_token(refresh_token, None)
            .await
    }

    /// The cached refresh token for external persistence, if any.
    pub async fn retrieve_refresh_token(&self, authentication_id: &str) -> Option<String> {
        self.tokens.get_refresh_token(authentication_id).await
    }

    /// Request a password reset; the server answers with an opaque hash the
    /// caller later submits through [`reset_password`](Self::reset_password).
    pub async fn forgot_password(&self, username: &str) -> Result<PasswordResetHash> {
        require_non_blank("username", username)?;
        let request = ForgotPassword {
            username: username.to_string(),
        };
        self.requests
            .post(FORGOT_PASSWORD_ENDPOINT, Some(&request), BodyFormat::Json, None)
            .await
    }

    /// Complete a password reset started by `forgot_password`.
    pub async fn reset_password(&self, reset: &ResetPassword) -> Result<()> {
        self.requests
            .post(RESET_PASSWORD_ENDPOINT, Some(reset), BodyFormat::Json, None)
            .await
    }

    /// Change the password of the user behind the given session.
    pub async fn update_password(
        &self,
        authentication_id: &str,
        previous_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let request = UserPasswordUpdate {
            previous_password: previous_password.to_string(),
            new_password: new_password.to_string(),
        };
        let resolver: Arc<dyn TokenResolver> = Arc::clone(&self.tokens) as Arc<dyn TokenResolver>;
        self.requests
            .with_authentication(resolver, authentication_id)
            .post(MY_PASSWORD_ENDPOINT, Some(&request), BodyFormat::Json, None)
            .await
    }

    /// Register a new user. Blank username or password fails before any I/O.
    pub async fn register_user(&self, user: &RegisterUser) -> Result<UserResponse> {
        require_non_blank("username", &user.username)?;
        require_non_blank("new_password", &user.new_password)?;
        self.requests
            .post(USERS_ENDPOINT, Some(user), BodyFormat::Json, None)
            .await
    }

    /// End a session. Idempotent; see [`TokenService::sign_out`].
    pub async fn sign_out(&self, authentication_id: &str) -> Result<()> {
        self.tokens.sign_out(authentication_id).await
    }
}
