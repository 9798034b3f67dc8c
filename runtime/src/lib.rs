//! Atomic execution environment for the Quorum governance engine.
//!
//! Every public operation runs as one [`Transaction`]: reads see the
//! transaction's own staged writes, and the whole batch reaches the store
//! only if the operation returns `Ok`. The native currency and the governance
//! token are kept as records in the same store, so balance movements share
//! that all-or-nothing guarantee.

pub mod config;
pub mod error;
pub mod ledger;
pub mod record;
pub mod runtime;
pub mod transaction;

pub use config::RuntimeConfig;
pub use error::RuntimeError;
pub use ledger::{NativeLedger, TokenLedger};
pub use record::AccountData;
pub use runtime::Runtime;
pub use transaction::Transaction;
