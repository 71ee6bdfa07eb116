//! # Catalog Configuration
//!
//! Where the catalog lives and how long its answers stay fresh.
//!
//! ## Configuration File Section
//! ```toml
//! [catalog]
//! base_url = "https://fakestoreapi.com"
//! revalidate_secs = 3600        # 0 disables the response cache
//! # request_timeout_secs = 10   # absent = transport default
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// Public catalog used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// Catalog client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Seconds a successful response is served from cache.
    #[serde(default = "default_revalidate_secs")]
    pub revalidate_secs: u64,

    /// Per-request timeout. `None` keeps the HTTP client's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_revalidate_secs() -> u64 {
    3600
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            base_url: default_base_url(),
            revalidate_secs: default_revalidate_secs(),
            request_timeout_secs: None,
        }
    }
}

impl CatalogConfig {
    /// Creates a config for `base_url` with default timings.
    pub fn new(base_url: impl Into<String>) -> Self {
        CatalogConfig {
            base_url: base_url.into(),
            ..CatalogConfig::default()
        }
    }

    /// Sets the cache lifetime (0 disables caching).
    pub fn revalidate_secs(mut self, secs: u64) -> Self {
        self.revalidate_secs = secs;
        self
    }

    /// Sets the per-request timeout.
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Cache lifetime, `None` when caching is disabled.
    pub fn revalidate(&self) -> Option<Duration> {
        (self.revalidate_secs > 0).then(|| Duration::from_secs(self.revalidate_secs))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Parses and checks the base URL.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };

        let url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "scheme must be http or https, got {}",
                url.scheme()
            )));
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("must not carry a query or fragment".to_string()));
        }

        Ok(url)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_base_url()?;

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
