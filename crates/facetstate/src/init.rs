//! # Context Initialization
//!
//! Locates the two stores and loads configuration.
//!
//! ## Store Locations
//!
//! - **Session**: snapshots are disposable, so they live in the platform cache
//!   directory (via the `directories` crate) under `session/`.
//! - **Preferences**: long-lived, so they live in the platform data directory
//!   under `preferences/`. The config file `facetstate.toml` is read from here
//!   too.
//!
//! ## Overrides
//!
//! 1. `FACETSTATE_DATA` (environment): relocates both stores under one root
//!    (`$FACETSTATE_DATA/session`, `$FACETSTATE_DATA/preferences`). This is
//!    primarily used for testing to isolate state.
//! 2. `session_dir` / `preferences_dir` in `facetstate.toml`: relocate each
//!    store individually. They win over the environment root.

use crate::config::FacetConfig;
use crate::startup::Browser;
use crate::store::{FsStore, StorageKeys};
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Environment variable relocating both stores.
pub const DATA_ENV: &str = "FACETSTATE_DATA";

pub struct FacetContext {
    pub config: FacetConfig,
    pub keys: StorageKeys,
    pub session_dir: PathBuf,
    pub preferences_dir: PathBuf,
}

impl FacetContext {
    pub fn session_store(&self) -> FsStore {
        FsStore::new(&self.session_dir)
    }

    pub fn preferences_store(&self) -> FsStore {
        FsStore::new(&self.preferences_dir)
    }

    /// A browser context at `location` over the on-disk stores.
    pub fn browser(&self, location: impl Into<String>) -> Browser<FsStore> {
        Browser::new(location, self.session_store(), self.preferences_store())
    }
}

struct BaseDirs {
    session: PathBuf,
    preferences: PathBuf,
}

fn base_dirs(data_override: Option<PathBuf>) -> BaseDirs {
    if let Some(root) = data_override {
        return BaseDirs {
            session: root.join("session"),
            preferences: root.join("preferences"),
        };
    }
    match ProjectDirs::from("com", "facetstate", "facetstate") {
        Some(dirs) => BaseDirs {
            session: dirs.cache_dir().join("session"),
            preferences: dirs.data_dir().join("preferences"),
        },
        None => {
            // No home directory: keep state next to the working directory.
            let root = Path::new(".facetstate");
            tracing::warn!("no platform directories available, using {}", root.display());
            BaseDirs {
                session: root.join("session"),
                preferences: root.join("preferences"),
            }
        }
    }
}

/// Load configuration and locate the stores.
///
/// `data_override` takes the place of `FACETSTATE_DATA` when given.
pub fn initialize(data_override: Option<PathBuf>) -> FacetContext {
    let data_override = data_override.or_else(|| std::env::var(DATA_ENV).ok().map(PathBuf::from));
    let base = base_dirs(data_override);

    let config: FacetConfig = Clapfig::builder()
        .app_name("facetstate")
        .file_name("facetstate.toml")
        .search_paths(vec![SearchPath::Path(base.preferences.clone())])
        .search_mode(SearchMode::Merge)
        .load()
        .unwrap_or_default();

    let session_dir = config.session_dir.clone().unwrap_or(base.session);
    let preferences_dir = config.preferences_dir.clone().unwrap_or(base.preferences);
    tracing::debug!(
        session = %session_dir.display(),
        preferences = %preferences_dir.display(),
        "stores located"
    );

    FacetContext {
        keys: config.storage_keys(),
        config,
        session_dir,
        preferences_dir,
    }
}
