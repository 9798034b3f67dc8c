//! Runtime configuration.

use quorum_types::NativeAmount;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Native units locked in every program-created account while it lives.
    /// Charged to the payer on creation, refunded to the named recipient on close.
    pub storage_deposit: NativeAmount,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            storage_deposit: NativeAmount::new(10),
        }
    }
}
