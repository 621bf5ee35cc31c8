//! Unbounded backend preserving insertion order.

use crate::domain::CacheKey;
use crate::ports::CacheBackend;
use indexmap::IndexMap;

/// Unbounded store; never evicts. Iteration follows insertion order,
/// which is incidental rather than a semantic guarantee.
pub struct OrderedBackend<E> {
    inner: IndexMap<CacheKey, E>,
}

impl<E> OrderedBackend<E> {
    pub fn new() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }
}

impl<E> Default for OrderedBackend<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone + Send> CacheBackend<E> for OrderedBackend<E> {
    fn get(&mut self, key: &str) -> Option<&E> {
        self.inner.get(key)
    }

    fn peek(&self, key: &str) -> Option<&E> {
        self.inner.get(key)
    }

    fn set(&mut self, key: CacheKey, element: E) {
        self.inner.insert(key, element);
    }

    fn delete(&mut self, key: &str) -> Option<E> {
        // shift_remove keeps the order of the remaining entries intact
        self.inner.shift_remove(key)
    }

    fn keys(&self) -> Vec<CacheKey> {
        self.inner.keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }
}
