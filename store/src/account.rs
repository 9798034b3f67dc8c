//! Account storage trait.

use crate::StoreError;
use quorum_types::Identity;
use std::collections::BTreeMap;

/// A staged modification of one account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change {
    Put(Vec<u8>),
    Delete,
}

/// All staged modifications of one operation, keyed by account identity.
pub type ChangeSet = BTreeMap<Identity, Change>;

/// Trait for account storage operations.
///
/// Records are opaque bytes; the runtime owns the encoding. A store must
/// apply a [`ChangeSet`] all-or-nothing: either every change becomes visible
/// or none does.
pub trait AccountStore {
    fn get_account(&self, id: &Identity) -> Result<Option<Vec<u8>>, StoreError>;

    fn exists(&self, id: &Identity) -> Result<bool, StoreError> {
        self.get_account(id).map(|data| data.is_some())
    }

    /// Atomically apply a set of changes.
    fn apply(&self, changes: ChangeSet) -> Result<(), StoreError>;

    fn account_count(&self) -> Result<u64, StoreError>;

    fn iter_accounts(&self) -> Result<Vec<(Identity, Vec<u8>)>, StoreError>;
}
