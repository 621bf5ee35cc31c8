//! Bounded backend with least-recently-used eviction.

use crate::domain::CacheKey;
use crate::ports::CacheBackend;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Fixed-capacity store; inserting beyond capacity evicts the
/// least-recently-used entry.
///
/// An evicted key is simply absent until re-populated by `get`/`put` at a
/// higher level; any pre-image held for it in a diff layer is unaffected,
/// so a later revert still restores it.
pub struct LruBackend<E> {
    inner: LruCache<CacheKey, E>,
}

impl<E> LruBackend<E> {
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: LruCache::new(cap),
        }
    }

    pub fn capacity(&self) -> usize {
        self.inner.cap().get()
    }
}

impl<E: Clone + Send> CacheBackend<E> for LruBackend<E> {
    fn get(&mut self, key: &str) -> Option<&E> {
        self.inner.get(key)
    }

    fn peek(&self, key: &str) -> Option<&E> {
        self.inner.peek(key)
    }

    fn set(&mut self, key: CacheKey, element: E) {
        self.inner.put(key, element);
    }

    fn delete(&mut self, key: &str) -> Option<E> {
        self.inner.pop(key)
    }

    fn keys(&self) -> Vec<CacheKey> {
        self.inner.iter().map(|(k, _)| k.clone()).collect()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }
}
