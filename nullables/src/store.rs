//! Nullable store: thread-safe in-memory account storage.

use quorum_store::{AccountStore, Change, ChangeSet, StoreError};
use quorum_types::Identity;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// An in-memory account store.
///
/// A change set is applied under a single lock, so readers never observe a
/// half-applied operation. `fail_next_commit` makes the next `apply` fail
/// without touching any account.
#[derive(Default)]
pub struct NullStore {
    accounts: Mutex<BTreeMap<Identity, Vec<u8>>>,
    fail_next: AtomicBool,
    commits: AtomicU64,
}

impl NullStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next commit fail with a backend error.
    pub fn fail_next_commit(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Number of change sets applied so far.
    pub fn commit_count(&self) -> u64 {
        self.commits.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<Identity, Vec<u8>>>, StoreError> {
        self.accounts
            .lock()
            .map_err(|e| StoreError::Backend(format!("store lock poisoned: {e}")))
    }
}

impl AccountStore for NullStore {
    fn get_account(&self, id: &Identity) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn exists(&self, id: &Identity) -> Result<bool, StoreError> {
        Ok(self.lock()?.contains_key(id))
    }

    fn apply(&self, changes: ChangeSet) -> Result<(), StoreError> {
        let mut accounts = self.lock()?;
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Backend("injected commit failure".into()));
        }
        for (id, change) in changes {
            match change {
                Change::Put(data) => {
                    accounts.insert(id, data);
                }
                Change::Delete => {
                    accounts.remove(&id);
                }
            }
        }
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn account_count(&self) -> Result<u64, StoreError> {
        Ok(self.lock()?.len() as u64)
    }

    fn iter_accounts(&self) -> Result<Vec<(Identity, Vec<u8>)>, StoreError> {
        Ok(self
            .lock()?
            .iter()
            .map(|(id, data)| (*id, data.clone()))
            .collect())
    }
}
