//! Backend adapters implementing the `CacheBackend` port.

pub mod lru_backend;
pub mod ordered_backend;

pub use lru_backend::*;
pub use ordered_backend::*;

use crate::domain::{BackendKind, CacheConfig, Element};
use crate::ports::CacheBackend;

/// Build the backend variant selected by `config`.
pub fn backend_for<E: Element>(config: &CacheConfig) -> Box<dyn CacheBackend<E>> {
    match config.kind {
        BackendKind::Lru { capacity } => Box::new(LruBackend::new(capacity)),
        BackendKind::Ordered => Box::new(OrderedBackend::new()),
    }
}
