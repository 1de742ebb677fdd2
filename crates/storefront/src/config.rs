//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `TOYVERSE_PAGE_SIZE` - Products per home-page batch (default: 8, min 1)
//! - `TOYVERSE_INFINITE_SCROLL` - Auto-load on scroll (default: true)
//! - `TOYVERSE_STORAGE_NAMESPACE` - Prefix for storage keys (default: toyverse)
//! - `TOYVERSE_CATALOG_PATH` - JSON catalog to use instead of the built-in one

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};
use crate::state::Pagination;
use crate::storage::StorageKeys;

const DEFAULT_PAGE_SIZE: usize = 8;
const DEFAULT_NAMESPACE: &str = "toyverse";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Products revealed per "Load More" step on the home page
    pub page_size: usize,
    /// Whether the scroll sentinel loads the next batch automatically
    pub infinite_scroll: bool,
    /// Prefix for local storage keys
    pub storage_namespace: String,
    /// Optional catalog file; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            infinite_scroll: true,
            storage_namespace: DEFAULT_NAMESPACE.to_string(),
            catalog_path: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let page_size = match lookup("TOYVERSE_PAGE_SIZE") {
            Some(raw) => parse_page_size(&raw)?,
            None => DEFAULT_PAGE_SIZE,
        };
        let infinite_scroll = match lookup("TOYVERSE_INFINITE_SCROLL") {
            Some(raw) => parse_bool("TOYVERSE_INFINITE_SCROLL", &raw)?,
            None => true,
        };
        let storage_namespace = lookup("TOYVERSE_STORAGE_NAMESPACE")
            .map(|ns| ns.trim().to_string())
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        let catalog_path = lookup("TOYVERSE_CATALOG_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            page_size,
            infinite_scroll,
            storage_namespace,
            catalog_path,
        })
    }

    /// Storage keys for this namespace.
    #[must_use]
    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::new(&self.storage_namespace)
    }

    /// Initial pagination cursor.
    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        Pagination::new(self.page_size, self.infinite_scroll)
    }

    /// Load the configured catalog, or the built-in one.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the configured file is unreadable or invalid.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        self.catalog_path
            .as_deref()
            .map_or_else(|| Ok(Catalog::toyverse()), Catalog::load)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_page_size(raw: &str) -> Result<usize, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("TOYVERSE_PAGE_SIZE".to_string(), msg);
    let size = raw
        .trim()
        .parse::<usize>()
        .map_err(|e| invalid(e.to_string()))?;
    if size == 0 {
        return Err(invalid("must be at least 1".to_string()));
    }
    Ok(size)
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected true/false, got '{other}'"),
        )),
    }
}
