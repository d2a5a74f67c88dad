use super::KeyValueStore;
use crate::error::{FacetError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const FILE_EXT: &str = ".json";

/// Filesystem key-value store: one file per key under `root`.
///
/// Store keys use `:` as a namespace separator, which is not portable in file
/// names, so it maps to `.` on disk (`facetstate:snapshot:cards` is stored as
/// `facetstate.snapshot.cards.json`). Any other character outside
/// `[A-Za-z0-9._-]` maps to `_`.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file backing `key`.
    pub fn item_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}{}", file_stem(key), FILE_EXT))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(FacetError::Io)?;
        }
        Ok(())
    }
}

fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            ':' => '.',
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') => c,
            _ => '_',
        })
        .collect()
}

impl KeyValueStore for FsStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.item_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(FacetError::Io(err)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.item_path(key);

        // Atomic write
        let tmp_file = self.root.join(format!(".{}-{}.tmp", file_stem(key), Uuid::new_v4()));
        fs::write(&tmp_file, value).map_err(FacetError::Io)?;
        fs::rename(&tmp_file, &path).map_err(FacetError::Io)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.item_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(FacetError::Io(err)),
        }
    }

    /// Keys as they appear on disk (after the `:` → `.` mapping).
    fn keys(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(FacetError::Io)? {
            let entry = entry.map_err(FacetError::Io)?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            if let Some(stem) = name.strip_suffix(FILE_EXT) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_key_is_none() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(dir.path().join("never-created"));
        assert_eq!(store.get_item("facetstate:snapshot:cards").unwrap(), None);
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn write_creates_directory_and_file() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(dir.path().join("session"));
        store.set_item("facetstate:snapshot:cards", "{}").unwrap();

        let path = store.item_path("facetstate:snapshot:cards");
        assert!(path.ends_with("facetstate.snapshot.cards.json"));
        assert_eq!(fs::read_to_string(path).unwrap(), "{}");
        assert_eq!(
            store.get_item("facetstate:snapshot:cards").unwrap(),
            Some("{}".to_string())
        );
    }

    #[test]
    fn overwrite_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(dir.path());
        store.set_item("k", "1").unwrap();
        store.set_item("k", "2").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(store.get_item("k").unwrap(), Some("2".to_string()));
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(dir.path());
        store.set_item("k", "1").unwrap();
        store.remove_item("k").unwrap();
        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
    }

    #[test]
    fn keys_list_stored_items() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(dir.path());
        store.set_item("p:snapshot:sets", "{}").unwrap();
        store.set_item("p:preferences:cards", "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(
            store.keys().unwrap(),
            vec!["p.preferences.cards", "p.snapshot.sets"]
        );
    }

    #[test]
    fn unusual_characters_are_sanitized() {
        assert_eq!(file_stem("a/b c:d"), "a_b_c.d");
    }
}
