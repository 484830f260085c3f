//! Blocking adapter for strictly synchronous callers.
//!
//! The async client is canonical. Everything here owns a private tokio
//! runtime and delegates each method with one `block_on`; no logic is
//! duplicated. Do not use these types from inside an async context.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::auth::{PasswordResetHash, RegisterUser, ResetPassword, UserResponse};
use crate::backends::ReqwestTransport;
use crate::config::MeshyConfig;
use crate::error::{MeshyError, Result};
use crate::mesh::{MeshesResource, PageResult};
use crate::query::MeshQuery;

/// Blocking counterpart of [`crate::MeshyClient`].
pub struct MeshyClient {
    inner: crate::MeshyClient<ReqwestTransport>,
    runtime: Arc<Runtime>,
}

impl MeshyClient {
    /// Blocking client against the hosted MeshyDB endpoints.
    pub fn new(tenant: &str, public_key: &str, private_key: &str) -> Result<Self> {
        let config = MeshyConfig::new(tenant, public_key, private_key)?;
        Self::with_config(config)
    }

    pub fn with_config(config: MeshyConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(MeshyError::Runtime)?;
        let inner =
            crate::MeshyClient::with_transport(Arc::new(ReqwestTransport::default()), config)?;
        Ok(Self {
            inner,
            runtime: Arc::new(runtime),
        })
    }

    pub fn login_with_password(&self, username: &str, password: &str) -> Result<Connection> {
        let inner = self
            .runtime
            .block_on(self.inner.login_with_password(username, password))?;
        Ok(self.connection(inner))
    }

    pub fn login_anonymously(&self, username: Option<&str>) -> Result<Connection> {
        let inner = self.runtime.block_on(self.inner.login_anonymously(username))?;
        Ok(self.connection(inner))
    }

    pub fn login_with_refresh_token(&self, refresh_token: &str) -> Result<Connection> {
        let inner = self
            .runtime
            .block_on(self.inner.login_with_refresh_token(refresh_token))?;
        Ok(self.connection(inner))
    }

    pub fn register_user(&self, user: &RegisterUser) -> Result<UserResponse> {
        self.runtime.block_on(self.inner.register_user(user))
    }

    pub fn forgot_password(&self, username: &str) -> Result<PasswordResetHash> {
        self.runtime.block_on(self.inner.forgot_password(username))
    }

    pub fn reset_password(&self, reset: &ResetPassword) -> Result<()> {
        self.runtime.block_on(self.inner.reset_password(reset))
    }

    fn connection(&self, inner: crate::Connection<ReqwestTransport>) -> Connection {
        Connection {
            inner,
            runtime: Arc::clone(&self.runtime),
        }
    }
}

/// Blocking counterpart of [`crate::Connection`].
pub struct Connection {
    inner: crate::Connection<ReqwestTransport>,
    runtime: Arc<Runtime>,
}

impl Connection {
    pub fn authentication_id(&self) -> &str {
        self.inner.authentication_id()
    }

    pub fn meshes(&self, mesh_name: &str) -> Result<Meshes<'_>> {
        Ok(Meshes {
            inner: self.inner.meshes(mesh_name)?,
            runtime: self.runtime.as_ref(),
        })
    }

    pub fn retrieve_refresh_token(&self) -> Option<String> {
        self.runtime.block_on(self.inner.retrieve_refresh_token())
    }

    pub fn update_password(&self, previous_password: &str, new_password: &str) -> Result<()> {
        self.runtime
            .block_on(self.inner.update_password(previous_password, new_password))
    }

    pub fn sign_out(&self) -> Result<()> {
        self.runtime.block_on(self.inner.sign_out())
    }
}

/// Blocking counterpart of [`MeshesResource`].
pub struct Meshes<'c> {
    inner: MeshesResource<'c, ReqwestTransport>,
    runtime: &'c Runtime,
}

impl<'c> Meshes<'c> {
    pub fn create<D>(&self, document: &D) -> Result<D>
    where
        D: Serialize + DeserializeOwned,
    {
        self.runtime.block_on(self.inner.create(document))
    }

    pub fn get<D>(&self, id: &str) -> Result<D>
    where
        D: DeserializeOwned,
    {
        self.runtime.block_on(self.inner.get(id))
    }

    pub fn update<D>(&self, id: &str, document: &D) -> Result<D>
    where
        D: Serialize + DeserializeOwned,
    {
        self.runtime.block_on(self.inner.update(id, document))
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.runtime.block_on(self.inner.delete(id))
    }

    pub fn search<D>(&self, query: &MeshQuery) -> Result<PageResult<D>>
    where
        D: DeserializeOwned,
    {
        self.runtime.block_on(self.inner.search(query))
    }
}
