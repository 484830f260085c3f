use std::sync::Arc;

use crate::auth::{AuthenticationService, PasswordResetHash, RegisterUser, ResetPassword, UserResponse};
use crate::backends::ReqwestTransport;
use crate::config::MeshyConfig;
use crate::error::{require_non_blank, Result};
use crate::http_client::HttpTransport;
use crate::mesh::MeshesResource;
use crate::request::{RequestService, TokenResolver};
use crate::token::{TokenService, TokenStore};

/// Top-level entry point: one tenant plus credentials, wired to a token
/// service on the auth base and a request service on the API base.
///
/// Each successful login yields a [`Connection`]. Connections share the
/// client's token store, so any number of identities can be live at once.
pub struct MeshyClient<T: HttpTransport> {
    tokens: Arc<TokenService<T>>,
    auth: AuthenticationService<T>,
    requests: RequestService<T>,
}

impl<T: HttpTransport> std::fmt::Debug for MeshyClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshyClient").finish_non_exhaustive()
    }
}

impl MeshyClient<ReqwestTransport> {
    /// Client against the hosted MeshyDB endpoints over reqwest.
    pub fn new(tenant: &str, public_key: &str, private_key: &str) -> Result<Self> {
        let config = MeshyConfig::new(tenant, public_key, private_key)?;
        Self::with_transport(Arc::new(ReqwestTransport::default()), config)
    }
}

impl<T: HttpTransport + 'static> MeshyClient<T> {
    /// Client over a custom transport, with its own private token store.
    pub fn with_transport(transport: Arc<T>, config: MeshyConfig) -> Result<Self> {
        Self::with_store(transport, config, TokenStore::new())
    }

    /// Client over a custom transport and an injected token store. Passing
    /// one store to several clients makes them share cached sessions.
    pub fn with_store(transport: Arc<T>, config: MeshyConfig, store: TokenStore) -> Result<Self> {
        let tokens = Arc::new(TokenService::new(
            Arc::clone(&transport),
            config.auth_url(),
            config.public_key(),
            Some(config.tenant()),
            store,
        )?);
        let auth_requests = RequestService::new(
            Arc::clone(&transport),
            config.auth_url(),
            Some(config.tenant().to_string()),
        )?;
        let auth = AuthenticationService::new(Arc::clone(&tokens), auth_requests);
        let requests = RequestService::new(
            transport,
            config.api_url(),
            Some(config.tenant().to_string()),
        )?;
        Ok(Self {
            tokens,
            auth,
            requests,
        })
    }

    /// Log in with user credentials.
    pub async fn login_with_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Connection<T>> {
        let id = self.auth.login_with_password(username, password).await?;
        Ok(self.connection(id))
    }

    /// Log in as a throwaway anonymous identity.
    pub async fn login_anonymously(&self, username: Option<&str>) -> Result<Connection<T>> {
        let id = self.auth.login_anonymously(username).await?;
        Ok(self.connection(id))
    }

    /// Resume a session from a refresh token persisted by an earlier run.
    pub async fn login_with_refresh_token(&self, refresh_token: &str) -> Result<Connection<T>> {
        let id = self.auth.login_with_refresh_token(refresh_token).await?;
        Ok(self.connection(id))
    }

    /// Register a new user account.
    pub async fn register_user(&self, user: &RegisterUser) -> Result<UserResponse> {
        self.auth.register_user(user).await
    }

    /// Start a password reset for a username.
    pub async fn forgot_password(&self, username: &str) -> Result<PasswordResetHash> {
        self.auth.forgot_password(username).await
    }

    /// Complete a password reset.
    pub async fn reset_password(&self, reset: &ResetPassword) -> Result<()> {
        self.auth.reset_password(reset).await
    }

    fn connection(&self, authentication_id: String) -> Connection<T> {
        let resolver: Arc<dyn TokenResolver> = Arc::clone(&self.tokens) as Arc<dyn TokenResolver>;
        let requests = self.requests.with_authentication(resolver, &authentication_id);
        Connection {
            authentication_id,
            requests,
            tokens: Arc::clone(&self.tokens),
            auth: self.auth.clone(),
        }
    }
}

/// One authenticated session: an authentication id bound to an API-base
/// request service that resolves the matching cached token on every call.
pub struct Connection<T: HttpTransport> {
    authentication_id: String,
    requests: RequestService<T>,
    tokens: Arc<TokenService<T>>,
    auth: AuthenticationService<T>,
}

impl<T: HttpTransport + 'static> Connection<T> {
    pub fn authentication_id(&self) -> &str {
        &self.authentication_id
    }

    /// The authenticated request service, for resources beyond the built-in
    /// wrappers.
    pub fn requests(&self) -> &RequestService<T> {
        &self.requests
    }

    /// Operations on one named mesh. The name is explicit configuration,
    /// lowercased to match the wire paths.
    pub fn meshes(&self, mesh_name: &str) -> Result<MeshesResource<'_, T>> {
        require_non_blank("mesh_name", mesh_name)?;
        Ok(MeshesResource::new(&self.requests, mesh_name))
    }

    /// The refresh token to persist externally for a later
    /// [`MeshyClient::login_with_refresh_token`].
    pub async fn retrieve_refresh_token(&self) -> Option<String> {
        self.tokens.get_refresh_token(&self.authentication_id).await
    }

    /// Change the password of the logged-in user.
    pub async fn update_password(
        &self,
        previous_password: &str,
        new_password: &str,
    ) -> Result<()> {
        self.auth
            .update_password(&self.authentication_id, previous_password, new_password)
            .await
    }

    /// Revoke this session and drop its cached tokens. Idempotent.
    pub async fn sign_out(&self) -> Result<()> {
        self.tokens.sign_out(&self.authentication_id).await
    }
}
