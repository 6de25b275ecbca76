//! # Catalog Configuration
//!
//! Where the catalog comes from and how long we wait for it.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default list endpoint
pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2/pokemon/";

/// Configuration for a catalog session
///
/// ## Example
/// ```rust,ignore
/// use catalog_core::config::CatalogConfig;
///
/// // PokeAPI, first 150 entries
/// let config = CatalogConfig::default();
///
/// // Environment overrides (CATALOG_API_URL, CATALOG_PAGE_LIMIT, ...)
/// let config = CatalogConfig::from_env();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// List endpoint; detail URLs come from the list response
    pub api_url: String,
    /// Number of entries requested in the single list fetch
    pub page_limit: u32,
    /// Per-request timeout; a hung request fails instead of blocking forever
    pub request_timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_limit: 150,
            request_timeout_secs: 10,
            user_agent: "catalog-viewer/0.1".to_string(),
        }
    }
}

impl CatalogConfig {
    /// Defaults with `CATALOG_*` environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply overrides from a key lookup. Unparseable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("CATALOG_API_URL").filter(|u| !u.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(raw) = lookup("CATALOG_PAGE_LIMIT") {
            match raw.trim().parse() {
                Ok(limit) => self.page_limit = limit,
                Err(_) => tracing::warn!(value = %raw, "Ignoring invalid CATALOG_PAGE_LIMIT"),
            }
        }
        if let Some(raw) = lookup("CATALOG_TIMEOUT_SECS") {
            match raw.trim().parse() {
                Ok(secs) => self.request_timeout_secs = secs,
                Err(_) => tracing::warn!(value = %raw, "Ignoring invalid CATALOG_TIMEOUT_SECS"),
            }
        }
        if let Some(agent) = lookup("CATALOG_USER_AGENT").filter(|a| !a.trim().is_empty()) {
            self.user_agent = agent;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.page_limit, 150);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("CATALOG_API_URL", "http://localhost:9000/api/"),
            ("CATALOG_PAGE_LIMIT", "20"),
            ("CATALOG_TIMEOUT_SECS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = CatalogConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_url, "http://localhost:9000/api/");
        assert_eq!(config.page_limit, 20);
        // invalid value keeps the default
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.user_agent, "catalog-viewer/0.1");
    }
}
