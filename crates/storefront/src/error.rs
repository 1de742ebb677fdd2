//! Unified error handling.
//!
//! Bad storage data, unknown ids and junk input are absorbed where they
//! happen. Startup (configuration, catalog) and rendering failures reach the
//! host as [`AppError`].

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Storage backend could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(CatalogError::Empty);
        assert_eq!(err.to_string(), "Catalog error: catalog has no products");

        let err = AppError::from(StorageError::Unavailable("no window".to_string()));
        assert_eq!(err.to_string(), "Storage error: storage unavailable: no window");
    }

    #[test]
    fn test_config_error_converts() {
        let err: AppError =
            ConfigError::InvalidEnvVar("TOYVERSE_PAGE_SIZE".to_string(), "bad".to_string()).into();
        assert!(matches!(err, AppError::Config(_)));
    }
}
