//! In-memory leaf store.
//!
//! [`LeafStore`] keeps its entries in a `BTreeMap` behind a `RwLock`. It is
//! the terminal unit of every lookup and may be mutated from any thread while
//! routers read from it.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::trace;

use crate::traits::{Keys, Resolvable};

/// A mutable, thread-safe map from string keys to string values.
///
/// Every method takes `&self`; share the store through an `Arc` to mutate it
/// while it is registered with a router.
#[derive(Debug, Default)]
pub struct LeafStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl LeafStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // Poisoned locks are recovered: every write is a single map operation.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, String>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, String>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert `value` under `key`, replacing any previous value.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        trace!(key = %key, "leaf store put");
        self.write().insert(key, value.into());
    }

    /// Remove `key` from the store.
    ///
    /// Returns `true` if the key existed. Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> bool {
        let removed = self.write().remove(key).is_some();
        if removed {
            trace!(key, "leaf store remove");
        }
        removed
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    /// Look up `key`. Returns `None` if it is absent.
    pub fn get(&self, key: &str) -> Option<String> {
        self.read().get(key).cloned()
    }

    /// Number of distinct keys currently stored.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Live view over the keys of this store, in key order.
    ///
    /// The iterator does not hold the lock between steps: every call to
    /// `next` re-reads the map and yields the smallest key strictly greater
    /// than the previous one. Concurrent `put`/`remove` calls are therefore
    /// allowed and may or may not be observed.
    pub fn keys(&self) -> LiveKeys<'_> {
        LiveKeys {
            store: self,
            last: None,
        }
    }
}

impl Resolvable for LeafStore {
    fn contains(&self, key: &str) -> bool {
        LeafStore::contains(self, key)
    }

    fn get(&self, key: &str) -> Option<String> {
        LeafStore::get(self, key)
    }

    fn keys(&self) -> Keys<'_> {
        Box::new(LeafStore::keys(self))
    }
}

impl<K, V> FromIterator<(K, V)> for LeafStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl fmt::Display for LeafStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = self.read();
        f.write_str("{")?;
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}")
    }
}

/// Cursor returned by [`LeafStore::keys`].
#[derive(Debug)]
pub struct LiveKeys<'a> {
    store: &'a LeafStore,
    last: Option<String>,
}

impl Iterator for LiveKeys<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let map = self.store.read();
        let next = match self.last.as_deref() {
            None => map.keys().next(),
            Some(last) => map
                .range::<str, _>((Bound::Excluded(last), Bound::Unbounded))
                .next()
                .map(|(key, _)| key),
        }
        .cloned();
        drop(map);

        if next.is_some() {
            self.last.clone_from(&next);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::thread;

    use proptest::prelude::*;

    #[test]
    fn empty_store() {
        let store = LeafStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert!(!store.contains("anything"));
        assert_eq!(store.get("anything"), None);
        assert_eq!(store.keys().count(), 0);
    }

    #[test]
    fn put_overwrite_and_remove() {
        let store = LeafStore::new();

        store.put("hello.world", "value");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("hello.world").as_deref(), Some("value"));
        assert!(store.contains("hello.world"));

        store.put("another.key", "another value");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("another.key").as_deref(), Some("another value"));

        store.put("hello.world", "new value");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("hello.world").as_deref(), Some("new value"));

        assert!(store.remove("another.key"));
        assert_eq!(store.len(), 1);
        assert!(store.contains("hello.world"));
        assert!(!store.contains("another.key"));
        assert_eq!(store.get("another.key"), None);
    }

    #[test]
    fn remove_absent_key_is_noop() {
        let store = LeafStore::new();
        store.put("kept", "1");
        assert!(!store.remove("ghost"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("kept").as_deref(), Some("1"));
    }

    #[test]
    fn keys_are_yielded_in_order() {
        let store: LeafStore = [("b", "2"), ("a", "1"), ("c", "3")].into_iter().collect();
        let keys: Vec<String> = store.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn keys_are_restartable() {
        let store: LeafStore = [("x", "1"), ("y", "2")].into_iter().collect();
        let first: Vec<String> = store.keys().collect();
        let second: Vec<String> = store.keys().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn keys_observe_mutation_between_steps() {
        let store: LeafStore = [("a", "1"), ("c", "3"), ("e", "5")].into_iter().collect();
        let mut keys = store.keys();

        assert_eq!(keys.next().as_deref(), Some("a"));
        store.remove("c");
        store.put("d", "4");
        assert_eq!(keys.next().as_deref(), Some("d"));
        assert_eq!(keys.next().as_deref(), Some("e"));
        assert_eq!(keys.next(), None);
    }

    #[test]
    fn keys_survive_removal_of_current_key() {
        let store: LeafStore = [("a", "1"), ("b", "2")].into_iter().collect();
        let mut keys = store.keys();
        assert_eq!(keys.next().as_deref(), Some("a"));
        store.remove("a");
        assert_eq!(keys.next().as_deref(), Some("b"));
        assert_eq!(keys.next(), None);
    }

    #[test]
    fn resolvable_matches_inherent_methods() {
        let store: LeafStore = [("k", "v")].into_iter().collect();
        let dyn_store: &dyn Resolvable = &store;
        assert!(dyn_store.contains("k"));
        assert_eq!(dyn_store.get("k").as_deref(), Some("v"));
        assert_eq!(dyn_store.get("missing"), None);
        assert_eq!(dyn_store.keys().collect::<Vec<_>>(), vec!["k"]);
    }

    #[test]
    fn display_renders_sorted_pairs() {
        let store: LeafStore = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(store.to_string(), "{a=1, b=2}");
        assert_eq!(LeafStore::new().to_string(), "{}");
    }

    #[test]
    fn concurrent_writers_and_key_iteration() {
        let store = Arc::new(LeafStore::new());
        for i in 0..100 {
            store.put(format!("seed.{i:03}"), "seed");
        }

        let writers: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..250 {
                        let key = format!("t{t}.{i:03}");
                        store.put(key.clone(), "v");
                        if i % 2 == 0 {
                            store.remove(&key);
                        }
                        store.remove(&format!("seed.{:03}", (i + t) % 100));
                    }
                })
            })
            .collect();

        let mut visited = 0usize;
        for _ in 0..10 {
            let keys: Vec<String> = store.keys().collect();
            assert!(keys.windows(2).all(|w| w[0] < w[1]));
            visited += keys.len();
        }

        for writer in writers {
            writer.join().unwrap();
        }

        // Every odd-numbered key written by each thread survives.
        assert_eq!(store.len(), 4 * 125);
        assert!(visited > 0);
    }

    proptest! {
        #[test]
        fn put_then_get_returns_value(key in "[a-z.]{1,12}", value in "[ -~]{0,24}") {
            let store = LeafStore::new();
            store.put(key.clone(), value.clone());
            prop_assert_eq!(store.get(&key), Some(value));
            store.remove(&key);
            prop_assert_eq!(store.get(&key), None);
        }

        #[test]
        fn len_tracks_distinct_keys(
            ops in prop::collection::vec((any::<bool>(), "[a-d]{1,2}", "[a-z]{0,4}"), 0..64)
        ) {
            let store = LeafStore::new();
            let mut model = HashMap::new();
            for (insert, key, value) in ops {
                if insert {
                    store.put(key.clone(), value.clone());
                    model.insert(key, value);
                } else {
                    store.remove(&key);
                    model.remove(&key);
                }
                prop_assert_eq!(store.len(), model.len());
            }
            for (key, value) in &model {
                prop_assert_eq!(store.get(key), Some(value.clone()));
            }
            prop_assert_eq!(store.keys().count(), model.len());
        }
    }
}
