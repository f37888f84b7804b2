//! Upstream API configuration.
//!
//! [`ApiConfig`] is resolved once at startup (flags, environment, files) and
//! then shared read-only by every call through an `Arc`.

use std::fmt;

/// Default base origin of the authenticated REST API.
pub const DEFAULT_BASE_URL: &str = "https://do.featurebase.app/v2";

/// Immutable connection settings for the upstream API.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    api_key: String,
    base_url: String,
    org_url: Option<String>,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            org_url: None,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_trailing_slash(base_url.into());
        self
    }

    /// Public organization origin, e.g. `https://feedback.example.com`.
    pub fn with_org_url(mut self, org_url: impl Into<String>) -> Self {
        let org_url = trim_trailing_slash(org_url.into());
        self.org_url = (!org_url.is_empty()).then_some(org_url);
        self
    }

    // ==================== Accessors ====================

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn org_url(&self) -> Option<&str> {
        self.org_url.as_deref()
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

// The key never appears in logs.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("org_url", &self.org_url)
            .finish()
    }
}
