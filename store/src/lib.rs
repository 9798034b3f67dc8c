//! Abstract storage for the Quorum governance engine.
//!
//! Every backend (in-memory for testing and simulation, or anything durable)
//! implements [`AccountStore`]. The rest of the codebase depends only on the
//! trait and stages its writes through a [`WriteBatch`].

pub mod account;
pub mod batch;
pub mod error;

pub use account::{AccountStore, Change, ChangeSet};
pub use batch::WriteBatch;
pub use error::StoreError;
