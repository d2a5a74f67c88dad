//! # Configuration
//!
//! Configuration is managed by [`clapfig`], which handles layered loading from
//! TOML files, environment variables, and programmatic overrides.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `FACETSTATE__STORAGE_PREFIX`, etc.
//! 2. **Config file**: `facetstate.toml` in the preferences directory.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `storage_prefix` | `facetstate` | Namespace for snapshot and preference keys |
//! | `session_dir` | platform cache dir | Where session snapshots are stored |
//! | `preferences_dir` | platform data dir | Where preferences are stored |

use crate::store::StorageKeys;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_STORAGE_PREFIX: &str = "facetstate";

/// Configuration, stored in `facetstate.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FacetConfig {
    /// Namespace prepended to every storage key.
    #[config(default = "facetstate")]
    pub storage_prefix: String,

    /// Directory for session snapshots. When absent, the platform cache
    /// directory is used.
    pub session_dir: Option<PathBuf>,

    /// Directory for preferences. When absent, the platform data directory
    /// is used.
    pub preferences_dir: Option<PathBuf>,
}

impl Default for FacetConfig {
    fn default() -> Self {
        Self {
            storage_prefix: DEFAULT_STORAGE_PREFIX.to_string(),
            session_dir: None,
            preferences_dir: None,
        }
    }
}

impl FacetConfig {
    /// Storage keys under the configured prefix. A blank prefix falls back to
    /// the default.
    pub fn storage_keys(&self) -> StorageKeys {
        let prefix = self.storage_prefix.trim();
        if prefix.is_empty() {
            StorageKeys::default()
        } else {
            StorageKeys::new(prefix)
        }
    }
}
