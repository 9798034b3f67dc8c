//! Nullable infrastructure for deterministic testing.
//!
//! All external dependencies (clock, storage) are abstracted behind traits.
//! This crate provides implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! The simulator binary runs on them as well: replaying a scenario must give
//! the same result every time.

pub mod clock;
pub mod store;

pub use clock::NullClock;
pub use store::NullStore;
