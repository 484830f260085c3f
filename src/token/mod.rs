//! Token lifecycle: cache store, grant exchange and lazy refresh.

mod service;
mod store;
mod wire;

pub use service::TokenService;
pub use store::{TokenCacheEntry, TokenStore};
