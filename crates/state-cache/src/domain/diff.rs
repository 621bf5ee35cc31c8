//! # Diff Layers (Lazy Pre-Image Capture)
//!
//! A diff layer records, for every key mutated after the layer was opened,
//! the value the backend held *immediately before the first mutation*.
//! Subsequent mutations of the same key within the layer's scope never
//! overwrite the captured pre-image.
//!
//! One layer exists per open checkpoint, plus an always-present base layer
//! whose keys are "what changed since the last flush".

use super::CacheKey;
use std::collections::HashMap;

/// Sparse pre-image map for one checkpoint scope.
///
/// The recorded value is `None` if the key had no backend entry before its
/// first mutation, `Some(element)` if it did.
#[derive(Clone, Debug)]
pub struct DiffLayer<E> {
    entries: HashMap<CacheKey, Option<E>>,
}

impl<E> DiffLayer<E> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// True if a pre-image was already captured for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Capture a pre-image, first-mutation-only.
    ///
    /// If the layer already holds an entry for `key` the call is a no-op;
    /// the earliest pre-image always wins. This is also exactly the merge
    /// rule `commit` needs when folding a child layer into its parent.
    pub fn record(&mut self, key: CacheKey, pre_image: Option<E>) {
        self.entries.entry(key).or_insert(pre_image);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CacheKey, &Option<E>)> {
        self.entries.iter()
    }
}

impl<E> Default for DiffLayer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> IntoIterator for DiffLayer<E> {
    type Item = (CacheKey, Option<E>);
    type IntoIter = std::collections::hash_map::IntoIter<CacheKey, Option<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
