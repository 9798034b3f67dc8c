//! Cryptographic primitives for the Quorum governance engine.
//!
//! - **Blake2b-256** for hashing
//! - Deterministic, collision-checked account identities derived from a
//!   namespace tag and a tuple of seeds

pub mod derive;
pub mod hash;

pub use derive::{derive_identity, identity_from_label, verify_identity};
pub use hash::{blake2b_256, blake2b_256_multi};
