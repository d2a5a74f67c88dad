//! # Storage Layer
//!
//! Search state outlives a single page view in two places:
//!
//! 1. **Snapshot**: the session-scoped copy of each mode's [`SearchState`],
//!    written after every settled change and discarded on reset.
//! 2. **Preferences**: long-lived scalar defaults per mode (sort field, sort
//!    direction, page size, boolean toggles). The startup path only reads them.
//!
//! Both live in a string key-value store behind the [`KeyValueStore`] trait.
//! This trait handles the "how" (filesystem vs memory) while [`snapshot`] and
//! [`crate::preferences`] handle the "what".
//!
//! ## Keys
//!
//! ```text
//! <prefix>:snapshot:cards
//! <prefix>:snapshot:sets
//! <prefix>:preferences:cards
//! <prefix>:preferences:sets
//! ```
//!
//! See [`StorageKeys`].
//!
//! ## Implementations
//!
//! - [`fs_backend::FsStore`]: one file per key in a directory.
//! - [`mem_backend::MemStore`]: for testing logic without filesystem I/O.
//!
//! [`SearchState`]: crate::model::SearchState

use crate::error::Result;
use crate::model::Mode;

pub mod fs_backend;
pub mod mem_backend;
pub mod snapshot;

pub use fs_backend::FsStore;
pub use mem_backend::MemStore;
pub use snapshot::{clear_snapshot, load_snapshot, save_snapshot};

/// Abstract interface for string key-value storage.
pub trait KeyValueStore {
    /// Read the value for `key`.
    /// Returns Ok(None) if the key is not present.
    /// Returns Err only when the store itself fails.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    /// MUST be atomic: a reader sees the old value or the new one.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// All keys currently present, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }
}

/// Builds the store keys for snapshots and preferences under one prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    prefix: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_STORAGE_PREFIX)
    }
}

impl StorageKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn snapshot(&self, mode: Mode) -> String {
        format!("{}:snapshot:{}", self.prefix, mode)
    }

    pub fn preferences(&self, mode: Mode) -> String {
        format!("{}:preferences:{}", self.prefix, mode)
    }
}
