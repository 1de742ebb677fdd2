//! Local key-value storage.
//!
//! Storage is injected through the [`KeyValueStorage`] trait so the same
//! storefront runs against `window.localStorage` in a browser (`web` feature)
//! and against [`MemoryStorage`] in tests and native hosts.
//!
//! Access is best-effort: [`Persistence`] is the one place where storage and
//! serialization failures are logged and then treated as missing data.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors reported by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A synchronous string key-value store with `localStorage` semantics.
pub trait KeyValueStorage {
    /// Read a value. `Ok(None)` means the key is not set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the removal.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, builder style.
    #[must_use]
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }

    /// Read a value directly, bypassing the trait.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// `window.localStorage`.
#[cfg(feature = "web")]
pub struct BrowserStorage {
    inner: web_sys::Storage,
}

#[cfg(feature = "web")]
impl BrowserStorage {
    /// Open the window's local storage.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` outside a browser window or when
    /// storage is disabled (e.g. some private browsing modes).
    pub fn local() -> Result<Self, StorageError> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        let inner = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "web")]
impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner
            .remove_item(key)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }
}

/// Storage keys, namespaced and versioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Serialized cart (`[{product, qty}]`).
    pub cart: String,
    /// Theme preference (`"light"` or `"dark"`).
    pub theme: String,
}

impl StorageKeys {
    /// Keys under `namespace`, e.g. `toyverse.cart.v1`.
    #[must_use]
    pub fn new(namespace: &str) -> Self {
        Self {
            cart: format!("{namespace}.cart.v1"),
            theme: format!("{namespace}.theme.v1"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new("toyverse")
    }
}

/// Best-effort access to a [`KeyValueStorage`].
///
/// Reads that fail or do not parse come back as `None`; failed writes are
/// dropped. Every suppressed failure is logged at `warn`.
#[derive(Debug)]
pub struct Persistence<S> {
    storage: S,
    keys: StorageKeys,
}

impl<S: KeyValueStorage> Persistence<S> {
    pub const fn new(storage: S, keys: StorageKeys) -> Self {
        Self { storage, keys }
    }

    #[must_use]
    pub const fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Read a raw string value.
    #[must_use]
    pub fn load_raw(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Storage read failed");
                None
            }
        }
    }

    /// Read and deserialize a JSON value.
    #[must_use]
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.load_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring unparseable stored value");
                None
            }
        }
    }

    /// Write a raw string value.
    pub fn save_raw(&mut self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            tracing::warn!(key, error = %e, "Storage write failed");
        }
    }

    /// Serialize and write a JSON value.
    pub fn save_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.save_raw(key, &raw),
            Err(e) => tracing::warn!(key, error = %e, "Failed to serialize value for storage"),
        }
    }

    /// Remove a value.
    pub fn remove(&mut self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            tracing::warn!(key, error = %e, "Storage remove failed");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    /// A backend where every operation fails.
    #[derive(Debug, Default)]
    pub struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("quota".to_string()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".to_string()))
        }

        fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_memory_storage_get_set_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
        storage.remove_item("k").unwrap();
        storage.remove_item("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_storage_keys_namespaced() {
        let keys = StorageKeys::default();
        assert_eq!(keys.cart, "toyverse.cart.v1");
        assert_eq!(keys.theme, "toyverse.theme.v1");
        assert_eq!(StorageKeys::new("demo").cart, "demo.cart.v1");
    }

    #[test]
    fn test_load_json_ignores_garbage() {
        let storage = MemoryStorage::new().with_item("k", "{not json");
        let persistence = Persistence::new(storage, StorageKeys::default());
        assert_eq!(persistence.load_json::<Vec<u32>>("k"), None);
    }

    #[test]
    fn test_save_then_load_json() {
        let mut persistence = Persistence::new(MemoryStorage::new(), StorageKeys::default());
        persistence.save_json("nums", &[1_u32, 2, 3]);
        assert_eq!(
            persistence.load_json::<Vec<u32>>("nums"),
            Some(vec![1, 2, 3])
        );
        assert_eq!(persistence.storage().peek("nums"), Some("[1,2,3]"));
    }

    #[test]
    fn test_broken_backend_is_suppressed() {
        let mut persistence = Persistence::new(BrokenStorage, StorageKeys::default());
        persistence.save_raw("k", "v");
        persistence.remove("k");
        assert_eq!(persistence.load_raw("k"), None);
    }
}
