use super::KeyValueStore;
use crate::error::{FacetError, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-memory key-value store for testing.
///
/// Uses `RefCell` for interior mutability since everything here is
/// single-threaded, which lets [`KeyValueStore`] take `&self` throughout.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    items: RefCell<BTreeMap<String, String>>,
    simulate_write_error: RefCell<bool>,
    simulate_read_error: RefCell<bool>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `items`.
    pub fn with_items<K, V>(items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        store
            .items
            .borrow_mut()
            .extend(items.into_iter().map(|(k, v)| (k.into(), v.into())));
        store
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Enable read error simulation (an unavailable store).
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    fn check_write(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(FacetError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        if *self.simulate_read_error.borrow() {
            return Err(FacetError::Store("Simulated read error".to_string()));
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.check_write()?;
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.check_write()?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.items.borrow().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemStore::new();
        assert_eq!(store.get_item("a").unwrap(), None);

        store.set_item("a", "1").unwrap();
        store.set_item("a", "2").unwrap();
        assert_eq!(store.get_item("a").unwrap(), Some("2".to_string()));

        store.remove_item("a").unwrap();
        store.remove_item("a").unwrap();
        assert_eq!(store.get_item("a").unwrap(), None);
    }

    #[test]
    fn keys_are_sorted() {
        let store = MemStore::with_items([("b", "x"), ("a", "y")]);
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn simulated_write_error_leaves_data_untouched() {
        let store = MemStore::with_items([("a", "1")]);
        store.set_simulate_write_error(true);

        assert!(matches!(store.set_item("a", "2"), Err(FacetError::Store(_))));
        assert!(store.remove_item("a").is_err());
        assert_eq!(store.get_item("a").unwrap(), Some("1".to_string()));
    }

    #[test]
    fn simulated_read_error() {
        let store = MemStore::with_items([("a", "1")]);
        store.set_simulate_read_error(true);
        assert!(store.get_item("a").is_err());
    }
}
