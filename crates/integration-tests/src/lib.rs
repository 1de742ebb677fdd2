//! Integration tests for the ToyVerse storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p toyverse-integration-tests
//! ```
//!
//! Set `RUST_LOG=toyverse_storefront=debug` to see reducer and storage logs.
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart mutations, storage round-trips, checkout
//! - `navigation` - Routing, detail fallback, not-found
//! - `catalog_view` - Filtering, search, sorting, pagination

use std::sync::Once;

use toyverse_storefront::catalog::Catalog;
use toyverse_storefront::config::StorefrontConfig;
use toyverse_storefront::storage::MemoryStorage;
use toyverse_storefront::{Outcome, StartOptions, Storefront};

static TRACING: Once = Once::new();

/// Install a test-writer tracing subscriber once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Start a storefront on the built-in catalog with a fixed seed.
pub fn start_with(storage: MemoryStorage, fragment: &str) -> (Storefront<MemoryStorage>, Outcome) {
    start_configured(&StorefrontConfig::default(), storage, fragment)
}

/// Start a storefront with explicit configuration.
pub fn start_configured(
    config: &StorefrontConfig,
    storage: MemoryStorage,
    fragment: &str,
) -> (Storefront<MemoryStorage>, Outcome) {
    init_tracing();
    Storefront::start(
        config,
        Catalog::toyverse(),
        storage,
        StartOptions {
            initial_fragment: Some(fragment.to_string()),
            prefers_dark: false,
            rng_seed: Some(42),
        },
    )
}

/// Simulate a page reload: stop the storefront and start a new one on the
/// same storage.
pub fn reload(storefront: Storefront<MemoryStorage>, fragment: &str) -> Storefront<MemoryStorage> {
    start_with(storefront.into_storage(), fragment).0
}
