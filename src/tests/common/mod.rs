// src/tests/common/mod.rs
pub use serde_json::json;

use httpmock::MockServer;
use serde_json::Value;
use std::sync::Arc;

use crate::{MeshyClient, MeshyConfig, ReqwestTransport};

/// Install a compact test subscriber once so failing tests show the SDK's
/// debug logs. Honors `RUST_LOG` when set.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("meshydb=debug"));
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Config pointed at a mock server, with `{tenant}` substitution exercised.
pub fn test_config(server: &MockServer) -> MeshyConfig {
    MeshyConfig::with_urls(
        "tester",
        "pub-key",
        "priv-key",
        &format!("{}/api/{{tenant}}", server.base_url()),
        &format!("{}/auth/{{tenant}}", server.base_url()),
    )
    .expect("test config")
}

pub fn test_client(server: &MockServer) -> MeshyClient<ReqwestTransport> {
    init_logging();
    MeshyClient::with_transport(Arc::new(ReqwestTransport::default()), test_config(server))
        .expect("test client")
}

pub fn token_body(access_token: &str, refresh_token: &str, expires_in: i64) -> Value {
    json!({
        "access_token": access_token,
        "expires_in": expires_in,
        "token_type": "Bearer",
        "refresh_token": refresh_token,
    })
}

pub const TOKEN_PATH: &str = "/auth/tester/connect/token";
pub const REVOCATION_PATH: &str = "/auth/tester/connect/revocation";
