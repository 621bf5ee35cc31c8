//! # State-Cache Test Suite
//!
//! Unified test crate covering the checkpoint cache from the outside, the
//! way its owning State Manager drives it.
//!
//! ## Structure
//!
//! ```text
//! tests/src/integration/
//! ├── checkpoint_properties.rs  # The seven core cache properties
//! ├── lockstep.rs               # Dual-cache State Manager contract
//! └── randomized.rs             # Model-based revert round-trips
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p state-cache-tests
//! ```
