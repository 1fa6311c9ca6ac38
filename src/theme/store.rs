//! Persistence for the theme preference.

use super::ThemeError;
use std::sync::{Arc, RwLock};

/// Storage for the raw theme string.
///
/// Values are stored as written; parsing is the controller's job, so a
/// corrupted entry can be detected and ignored there.
pub trait ThemeStore {
    /// Returns the stored value, or `Ok(None)` when nothing is stored.
    fn load(&self) -> Result<Option<String>, ThemeError>;

    fn save(&self, value: &str) -> Result<(), ThemeError>;
}

/// In-memory store for native builds and tests.
///
/// Clones share the same slot.
#[derive(Clone, Default)]
pub struct MemoryThemeStore {
    value: Arc<RwLock<Option<String>>>,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `value`.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Arc::new(RwLock::new(Some(value.into()))),
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<String>, ThemeError> {
        let value = self
            .value
            .read()
            .map_err(|e| ThemeError::Storage(e.to_string()))?;
        Ok(value.clone())
    }

    fn save(&self, value: &str) -> Result<(), ThemeError> {
        *self
            .value
            .write()
            .map_err(|e| ThemeError::Storage(e.to_string()))? = Some(value.to_string());
        Ok(())
    }
}

/// Store backed by the browser's localStorage.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageThemeStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageThemeStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, ThemeError> {
        let window = web_sys::window().ok_or(ThemeError::StorageUnavailable)?;
        window
            .local_storage()
            .map_err(|e| ThemeError::Storage(format!("{:?}", e)))?
            .ok_or(ThemeError::StorageUnavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl ThemeStore for LocalStorageThemeStore {
    fn load(&self) -> Result<Option<String>, ThemeError> {
        Self::storage()?
            .get_item(&self.key)
            .map_err(|e| ThemeError::Storage(format!("{:?}", e)))
    }

    fn save(&self, value: &str) -> Result<(), ThemeError> {
        Self::storage()?
            .set_item(&self.key, value)
            .map_err(|e| ThemeError::Storage(format!("{:?}", e)))
    }
}
