//! # state-cache
//!
//! Checkpointable key-value cache layer for blockchain transaction
//! execution. Every account read/write and every contract-storage
//! read/write performed by the VM passes through here before (optionally)
//! reaching the persistent state trie.
//!
//! ## Role in System
//!
//! - **Checkpoint discipline**: the State Manager opens a checkpoint on
//!   both caches when the VM enters a call/transaction frame, then commits
//!   or reverts both when the frame exits. Reverts are exact pre-image
//!   recovery, entirely in memory.
//! - **Trie shield**: `get` returning `None` means "not cached"; the State
//!   Manager falls back to the trie and re-populates. `flush` hands back
//!   the net changes to persist, once per block or transaction boundary.
//!
//! ## Flow
//!
//! ```text
//! [VM frame enter] ──checkpoint──→ [AccountCache] + [StorageCache]
//! [VM execution]   ──get/put/del─→       │ diff layers capture pre-images
//! [VM frame exit]  ──commit/revert→      │
//! [block boundary] ──flush────────→ net changes → [State Trie]
//! ```
//!
//! ## Lockstep Contract
//!
//! The two caches share no state; the State Manager must drive their
//! checkpoint/commit/revert calls in lockstep. This crate documents that
//! obligation rather than enforcing it.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
