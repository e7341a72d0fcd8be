//! Memo cache with explicit invalidation.
//!
//! Computing a state's style sheet is deterministic in its options, so the
//! result is cached per options key. Entries are stamped with the cache
//! version; [`OptionsCache::clear_cache`] bumps the version, which
//! invalidates every entry without walking them.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

#[derive(Debug)]
struct Entry<V> {
    version: u64,
    value: Arc<V>,
}

#[derive(Debug)]
pub struct OptionsCache<K, V> {
    version: u64,
    entries: HashMap<K, Entry<V>>,
}

impl<K, V> Default for OptionsCache<K, V> {
    fn default() -> Self {
        Self {
            version: 0,
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> OptionsCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, computing it on a miss or when the
    /// entry predates the last [`clear_cache`](Self::clear_cache).
    pub fn get_or_insert_with(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> Arc<V> {
        let version = self.version;
        if let Some(entry) = self.entries.get(&key) {
            if entry.version == version {
                return Arc::clone(&entry.value);
            }
        }
        let value = Arc::new(compute(&key));
        self.entries.insert(
            key,
            Entry {
                version,
                value: Arc::clone(&value),
            },
        );
        value
    }

    /// Invalidates every entry.
    pub fn clear_cache(&mut self) {
        self.version += 1;
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries
            .values()
            .filter(|e| e.version == self.version)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_returns_same_arc() {
        let mut cache = OptionsCache::new();
        let mut computed = 0;
        let a = cache.get_or_insert_with("active", |_| {
            computed += 1;
            1
        });
        let b = cache.get_or_insert_with("active", |_| {
            computed += 1;
            2
        });
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(computed, 1);
    }

    #[test]
    fn test_clear_cache_recomputes() {
        let mut cache = OptionsCache::new();
        let first = cache.get_or_insert_with(1u8, |_| "a".to_string());
        cache.clear_cache();
        assert!(cache.is_empty());
        let second = cache.get_or_insert_with(1u8, |_| "b".to_string());
        assert_eq!(*first, "a");
        assert_eq!(*second, "b");
        assert_eq!(cache.version(), 1);
    }
}
