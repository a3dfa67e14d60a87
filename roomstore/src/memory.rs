use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{SharedStore, StoreError};

/// In-memory store backed by one shared map.
///
/// Clones share the underlying map, so two sessions holding clones see each
/// other's writes the way two clients of a remote store would. Used in
/// tests and for in-process demos.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SharedStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let store = MemoryStore::new();
        store.set("room_1", "value").unwrap();
        assert_eq!(store.get("room_1").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_clones_share_state() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("room_1", "from_a").unwrap();
        assert_eq!(b.get("room_1").unwrap().as_deref(), Some("from_a"));
        b.set("room_1", "from_b").unwrap();
        assert_eq!(a.get("room_1").unwrap().as_deref(), Some("from_b"));
    }

    #[test]
    fn test_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("absent").unwrap(), None);
    }
}
