//! Keyed table of series stores.

use crate::error::{ChartError, Result};
use crate::series::SeriesStore;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Registry handle shared between an application and the charts it owns.
pub type SharedRegistry = Rc<RefCell<SeriesRegistry>>;

/// Mapping from key to [`SeriesStore`], at most one store per key.
#[derive(Debug, Clone, Default)]
pub struct SeriesRegistry {
    stores: HashMap<String, SeriesStore>,
}

impl SeriesRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a fresh registry in a shareable handle.
    pub fn shared() -> SharedRegistry {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Insert `store`, returning the store it replaced under the same key.
    pub fn add(&mut self, store: SeriesStore) -> Option<SeriesStore> {
        let replaced = self.stores.insert(store.key().to_string(), store);
        if let Some(old) = &replaced {
            log::debug!("replaced series '{}' ({} values)", old.key(), old.len());
        }
        replaced
    }

    /// Look up a store.
    pub fn get(&self, key: &str) -> Option<&SeriesStore> {
        self.stores.get(key)
    }

    /// Look up a store for mutation.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut SeriesStore> {
        self.stores.get_mut(key)
    }

    /// Look up a store, reporting absence as [`ChartError::SeriesNotFound`].
    pub fn require(&self, key: &str) -> Result<&SeriesStore> {
        self.get(key).ok_or_else(|| ChartError::SeriesNotFound {
            key: key.to_string(),
        })
    }

    /// Mutable counterpart of [`require`](Self::require).
    pub fn require_mut(&mut self, key: &str) -> Result<&mut SeriesStore> {
        self.stores
            .get_mut(key)
            .ok_or_else(|| ChartError::SeriesNotFound {
                key: key.to_string(),
            })
    }

    /// Remove a store if present.
    pub fn remove(&mut self, key: &str) -> Option<SeriesStore> {
        self.stores.remove(key)
    }

    /// Whether `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.stores.contains_key(key)
    }

    /// Minimum of the named store; `None` if absent or empty.
    pub fn min(&self, key: &str) -> Option<f64> {
        self.get(key)?.min()
    }

    /// Maximum of the named store; `None` if absent or empty.
    pub fn max(&self, key: &str) -> Option<f64> {
        self.get(key)?.max()
    }

    /// Number of registered stores.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// True when no stores are registered.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Registered keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }
}
