//! # Checkpointable Cache Engine
//!
//! Orchestrates a pluggable backend and a stack of diff layers.
//!
//! ## Problem
//!
//! EVM call-frame semantics demand nested, byte-for-byte undoable
//! mutation: a failed call must leave no trace. Snapshotting the whole
//! cache per frame would be ruinous.
//!
//! ## Solution: Layered Diff Stack
//!
//! One sparse diff layer per open checkpoint captures each touched key's
//! pre-image on first mutation only. `revert` replays the top layer back
//! into the backend; `commit` folds it into the parent scope, keeping the
//! earliest pre-image alive for an outer revert. The base layer (index 0)
//! never pops - its keys are "changed since last flush".

use super::{CacheError, CacheKey, DiffLayer, Element};
use crate::adapters::backend_for;
use crate::domain::CacheConfig;
use crate::ports::CacheBackend;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Operation counters for one engine lifetime. Observational only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub reads: u64,
    pub hits: u64,
    pub writes: u64,
    pub dels: u64,
}

impl CacheStats {
    /// Fraction of reads that hit the backend.
    pub fn hit_rate(&self) -> f64 {
        if self.reads == 0 {
            0.0
        } else {
            self.hits as f64 / self.reads as f64
        }
    }
}

/// Generic checkpointable cache over one element shape.
///
/// Single-threaded by design: callers serialize access, so there is no
/// internal locking. The backend is exclusively owned by this engine.
pub struct CheckpointCache<E: Element> {
    backend: Box<dyn CacheBackend<E>>,
    /// Index 0 is the always-present base layer; open checkpoint depth is
    /// `diffs.len() - 1`.
    diffs: Vec<DiffLayer<E>>,
    stats: CacheStats,
}

impl<E: Element> CheckpointCache<E> {
    /// Create an engine with the backend variant selected by `config`.
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_backend(backend_for(config))
    }

    /// Create an engine over a caller-supplied backend.
    pub fn with_backend(backend: Box<dyn CacheBackend<E>>) -> Self {
        Self {
            backend,
            diffs: vec![DiffLayer::new()],
            stats: CacheStats::default(),
        }
    }

    /// Look up `key`. `None` means "not cached" - the caller falls back to
    /// the trie; the engine itself never fetches.
    pub fn get(&mut self, key: &str) -> Option<&E> {
        self.stats.reads += 1;
        let element = self.backend.get(key);
        if element.is_some() {
            self.stats.hits += 1;
        }
        element
    }

    /// Write `element` under `key`, capturing the pre-image first.
    ///
    /// A negative element keeps the key present in the backend, so "known
    /// absent" stays distinguishable from "never written".
    pub fn put(&mut self, key: CacheKey, element: E) {
        self.save_pre_state(&key);
        self.backend.set(key, element);
        self.stats.writes += 1;
    }

    /// Mark `key` as known-absent. Same pre-image capture as `put`.
    pub fn del(&mut self, key: CacheKey) {
        self.save_pre_state(&key);
        self.backend.set(key, E::negative());
        self.stats.dels += 1;
    }

    /// Open a new checkpoint scope. Always succeeds.
    pub fn checkpoint(&mut self) {
        self.diffs.push(DiffLayer::new());
        debug!(depth = self.checkpoint_depth(), "opened checkpoint");
    }

    /// Fold the innermost checkpoint into its parent scope.
    ///
    /// The backend is untouched; only pre-images the parent has not seen
    /// are copied down, so an outer revert still restores the state from
    /// before either checkpoint.
    pub fn commit(&mut self) -> Result<(), CacheError> {
        if self.checkpoint_depth() == 0 {
            return Err(CacheError::NoOpenCheckpoint);
        }
        let Some(popped) = self.diffs.pop() else {
            return Err(CacheError::NoOpenCheckpoint);
        };
        if let Some(parent) = self.diffs.last_mut() {
            for (key, pre_image) in popped {
                parent.record(key, pre_image);
            }
        }
        debug!(depth = self.checkpoint_depth(), "committed checkpoint");
        Ok(())
    }

    /// Undo every mutation made since the innermost checkpoint opened.
    ///
    /// Keys never touched inside the checkpoint are left alone; only the
    /// sparse diff is replayed.
    pub fn revert(&mut self) -> Result<(), CacheError> {
        if self.checkpoint_depth() == 0 {
            return Err(CacheError::NoOpenCheckpoint);
        }
        let Some(popped) = self.diffs.pop() else {
            return Err(CacheError::NoOpenCheckpoint);
        };
        for (key, pre_image) in popped {
            match pre_image {
                Some(element) => self.backend.set(key, element),
                None => {
                    self.backend.delete(&key);
                }
            }
        }
        debug!(depth = self.checkpoint_depth(), "reverted checkpoint");
        Ok(())
    }

    /// Extract every key mutated since the last flush, paired with its
    /// current backend value, and reset the change tracking.
    ///
    /// Backend values are untouched. Keys no longer present in the backend
    /// (evicted) are skipped; the caller re-fetches them from the trie on
    /// demand.
    ///
    /// Call this at checkpoint depth 0 (the block/transaction boundary).
    /// Flushing under an open checkpoint drains that checkpoint's diff
    /// layer too, so already-flushed keys can no longer be reverted.
    pub fn flush(&mut self) -> Vec<(CacheKey, E)> {
        let drained = match self.diffs.last_mut() {
            Some(layer) => std::mem::take(layer),
            None => DiffLayer::new(),
        };
        let mut items = Vec::with_capacity(drained.len());
        for (key, _pre_image) in drained {
            if let Some(element) = self.backend.peek(&key) {
                items.push((key, element.clone()));
            }
        }
        debug!(items = items.len(), "flushed cache diff");
        items
    }

    /// Number of currently open checkpoints.
    pub fn checkpoint_depth(&self) -> usize {
        self.diffs.len().saturating_sub(1)
    }

    /// Number of elements currently in the backend.
    pub fn len(&self) -> usize {
        self.backend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    /// Snapshot of all backend keys (used for address-scoped scans).
    pub fn keys(&self) -> Vec<CacheKey> {
        self.backend.keys()
    }

    /// Wipe the backend and all diff layers. Stats are lifetime counters
    /// and are not reset.
    pub fn clear(&mut self) {
        self.backend.clear();
        self.diffs = vec![DiffLayer::new()];
    }

    /// Operation counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Capture the current backend value (or absence) for `key` into the
    /// top diff layer, unless that layer already holds a pre-image for it.
    fn save_pre_state(&mut self, key: &str) {
        if let Some(layer) = self.diffs.last_mut() {
            if !layer.contains(key) {
                let pre_image = self.backend.peek(key).cloned();
                layer.record(key.to_string(), pre_image);
            }
        }
    }
}

impl<E: Element> std::fmt::Debug for CheckpointCache<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckpointCache")
            .field("len", &self.backend.len())
            .field("checkpoint_depth", &self.checkpoint_depth())
            .field("stats", &self.stats)
            .finish()
    }
}
