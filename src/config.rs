use crate::error::{require_non_blank, Result};

/// Default API base template; `{tenant}` is substituted at configuration time.
pub const DEFAULT_API_URL: &str = "https://api.meshydb.com/{tenant}";
/// Default auth base template.
pub const DEFAULT_AUTH_URL: &str = "https://auth.meshydb.com/{tenant}";

const TENANT_PLACEHOLDER: &str = "{tenant}";

/// Validated client setup: tenant, key pair and resolved base URLs.
///
/// Construction fails fast on blank parameters, before any network I/O.
#[derive(Debug, Clone)]
pub struct MeshyConfig {
    tenant: String,
    public_key: String,
    private_key: String,
    api_url: String,
    auth_url: String,
}

impl MeshyConfig {
    /// Configuration against the hosted MeshyDB endpoints.
    pub fn new(tenant: &str, public_key: &str, private_key: &str) -> Result<Self> {
        Self::with_urls(tenant, public_key, private_key, DEFAULT_API_URL, DEFAULT_AUTH_URL)
    }

    /// Configuration with explicit base URL templates. Each template may
    /// contain a `{tenant}` placeholder, replaced here.
    pub fn with_urls(
        tenant: &str,
        public_key: &str,
        private_key: &str,
        api_url: &str,
        auth_url: &str,
    ) -> Result<Self> {
        require_non_blank("tenant", tenant)?;
        require_non_blank("public_key", public_key)?;
        require_non_blank("private_key", private_key)?;

        let tenant = tenant.trim().to_string();
        let api_url = api_url.replace(TENANT_PLACEHOLDER, &tenant);
        let auth_url = auth_url.replace(TENANT_PLACEHOLDER, &tenant);

        Ok(Self {
            tenant,
            public_key: public_key.trim().to_string(),
            private_key: private_key.trim().to_string(),
            api_url,
            auth_url,
        })
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    /// The public key, used as the OAuth client id.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }
}
