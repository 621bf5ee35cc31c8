use crate::domain::CacheKey;

/// Single-layer key→element store underlying one cache engine.
///
/// The engine depends only on this trait; whether the store is bounded
/// (LRU eviction) or unbounded (insertion-ordered) is decided once, at
/// construction. Implementations own the live view of all cached keys and
/// know nothing about checkpoints.
pub trait CacheBackend<E>: Send {
    /// Look up an element, updating recency for eviction policies.
    fn get(&mut self, key: &str) -> Option<&E>;

    /// Look up an element without touching recency. Used for diff-layer
    /// pre-image capture and flush, which must not perturb eviction order.
    fn peek(&self, key: &str) -> Option<&E>;

    /// Insert or overwrite an element. Bounded stores may evict the
    /// least-recently-used entry to make room.
    fn set(&mut self, key: CacheKey, element: E);

    /// Remove a key outright, returning the element if present.
    fn delete(&mut self, key: &str) -> Option<E>;

    /// Snapshot of all currently stored keys.
    fn keys(&self) -> Vec<CacheKey>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    fn clear(&mut self);
}
