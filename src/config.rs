//! Client configuration.

use std::env;
use std::time::Duration;

use crate::error::{BoxError, Result};

/// Default metadata API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.box.com/2.0";
/// Default upload API base URL.
pub const DEFAULT_UPLOAD_BASE: &str = "https://upload.box.com/api/2.0";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`crate::ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// OAuth2 bearer token. Obtaining and refreshing it is up to the caller.
    pub access_token: String,
    /// Metadata API base URL
    pub api_base: String,
    /// Upload API base URL
    pub upload_base: String,
    /// Optional proxy (e.g. "http://proxy:8080" or "socks5://proxy:1080")
    pub proxy: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Config with default endpoints for the given token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            upload_base: DEFAULT_UPLOAD_BASE.to_string(),
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read `BOX_ACCESS_TOKEN` (required), `BOX_API_BASE`, `BOX_UPLOAD_BASE`
    /// and `BOX_PROXY` from the environment.
    pub fn from_env() -> Result<Self> {
        let token = env::var("BOX_ACCESS_TOKEN")
            .map_err(|_| BoxError::Custom("BOX_ACCESS_TOKEN is not set".to_string()))?;
        let mut config = Self::new(token);
        if let Ok(base) = env::var("BOX_API_BASE") {
            config.api_base = base;
        }
        if let Ok(base) = env::var("BOX_UPLOAD_BASE") {
            config.upload_base = base;
        }
        config.proxy = env::var("BOX_PROXY").ok().filter(|p| !p.is_empty());
        Ok(config)
    }

    /// Route requests through a proxy.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
