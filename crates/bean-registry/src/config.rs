//! Registry configuration
//!
//! # Example
//!
//! ```ignore
//! use bean_registry::{ProxyFallback, RegistryConfig};
//!
//! let config = RegistryConfig::default()
//!     .with_proxy_fallback(ProxyFallback::Reject)
//!     .with_fail_fast(true);
//! ```

use serde::{Deserialize, Serialize};
use std::env;

/// What to do when a type requires interception but no proxy can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProxyFallback {
    /// Register the raw instance without interception and log a warning.
    #[default]
    RawInstance,
    /// Fail that type's registration.
    Reject,
}

impl ProxyFallback {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "raw" | "raw_instance" => Some(Self::RawInstance),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Recovery from `ProxyConstructionError`.
    pub proxy_fallback: ProxyFallback,
    /// Refuse to publish a registry when any registration failed.
    pub fail_fast: bool,
}

impl RegistryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BEAN_PROXY_FALLBACK`: `raw` or `reject` (default: raw)
    /// - `BEAN_FAIL_FAST`: `true`/`1` to enable (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            proxy_fallback: env::var("BEAN_PROXY_FALLBACK")
                .ok()
                .and_then(|v| ProxyFallback::parse(&v))
                .unwrap_or(defaults.proxy_fallback),

            fail_fast: env::var("BEAN_FAIL_FAST")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.fail_fast),
        }
    }

    pub fn with_proxy_fallback(mut self, fallback: ProxyFallback) -> Self {
        self.proxy_fallback = fallback;
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}
