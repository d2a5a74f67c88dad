use crate::startup::Browser;
use crate::store::{FsStore, StorageKeys};
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
    pub keys: StorageKeys,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
            keys: StorageKeys::default(),
        }
    }

    pub fn session_store(&self) -> FsStore {
        FsStore::new(self.root.join("session"))
    }

    pub fn preferences_store(&self) -> FsStore {
        FsStore::new(self.root.join("preferences"))
    }

    /// A browser at `location` over this environment's stores.
    pub fn browser(&self, location: &str) -> Browser<FsStore> {
        Browser::new(location, self.session_store(), self.preferences_store())
    }
}
