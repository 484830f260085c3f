//! # MeshyDB SDK
//!
//! Client SDK for the MeshyDB backend-as-a-service. Authenticates users via
//! OAuth-style token flows, caches token pairs per authentication id with
//! lazy refresh-on-expiry, and issues CRUD and search requests against
//! user-defined document collections ("meshes").
//!
//! Modules:
//! - `token` — token store and token service (grants, lazy refresh, revocation)
//! - `request` — request building, header injection, JSON/form bodies
//! - `auth` — login, registration and password flows
//! - `client` — the `MeshyClient` facade and per-login `Connection`
//! - `mesh` / `query` — mesh CRUD, search filters and ordering
//! - `blocking` — thin blocking adapter over the async client
//!
//! ```no_run
//! use meshydb::{Filter, MeshQuery, MeshyClient};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Person {
//!     #[serde(skip_serializing)]
//!     _id: Option<String>,
//!     name: String,
//! }
//!
//! # async fn example() -> meshydb::Result<()> {
//! let client = MeshyClient::new("my-tenant", "public-key", "private-key")?;
//! let connection = client.login_with_password("user", "secret").await?;
//!
//! let people = connection.meshes("person")?;
//! people.create(&Person { _id: None, name: "Bo".into() }).await?;
//! let page = people
//!     .search::<Person>(&MeshQuery::new().filter(Filter::eq("name", "Bo")))
//!     .await?;
//! # let _ = page;
//!
//! // Persist this externally to resume the session after a restart.
//! let refresh_token = connection.retrieve_refresh_token().await;
//! # let _ = refresh_token;
//! connection.sign_out().await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod backends;
pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod http_client;
pub mod mesh;
pub mod query;
pub mod request;
pub mod tests;
pub mod token;

pub use crate::auth::{
    AuthenticationService, ForgotPassword, PasswordResetHash, RegisterUser, ResetPassword,
    UserPasswordUpdate, UserResponse,
};
pub use crate::backends::ReqwestTransport;
pub use crate::client::{Connection, MeshyClient};
pub use crate::config::{MeshyConfig, DEFAULT_API_URL, DEFAULT_AUTH_URL};
pub use crate::error::{MeshyError, Result, TransportError};
pub use crate::http_client::{HttpRequest, HttpResponse, HttpTransport};
pub use crate::mesh::{MeshesResource, PageResult};
pub use crate::query::{Filter, MeshQuery, OrderBy};
pub use crate::request::{BodyFormat, RequestService, TokenResolver};
pub use crate::token::{TokenCacheEntry, TokenService, TokenStore};
