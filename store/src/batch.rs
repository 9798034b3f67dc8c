//! Write batching: stage the writes of one operation on top of a store.
//!
//! # Usage
//!
//! ```ignore
//! let mut batch = WriteBatch::new(&store);
//! batch.put(id, bytes);
//! batch.delete(other);
//! batch.commit()?;
//! ```
//!
//! Reads through the batch see its own staged writes. If the batch is dropped
//! without calling [`WriteBatch::commit`], nothing reaches the store.

use crate::account::{AccountStore, Change, ChangeSet};
use crate::StoreError;
use quorum_types::Identity;

pub struct WriteBatch<'a> {
    store: &'a dyn AccountStore,
    staged: ChangeSet,
}

impl<'a> WriteBatch<'a> {
    pub fn new(store: &'a dyn AccountStore) -> Self {
        Self {
            store,
            staged: ChangeSet::new(),
        }
    }

    /// Read an account, preferring this batch's staged state.
    pub fn get(&self, id: &Identity) -> Result<Option<Vec<u8>>, StoreError> {
        match self.staged.get(id) {
            Some(Change::Put(data)) => Ok(Some(data.clone())),
            Some(Change::Delete) => Ok(None),
            None => self.store.get_account(id),
        }
    }

    pub fn exists(&self, id: &Identity) -> Result<bool, StoreError> {
        match self.staged.get(id) {
            Some(Change::Put(_)) => Ok(true),
            Some(Change::Delete) => Ok(false),
            None => self.store.exists(id),
        }
    }

    pub fn put(&mut self, id: Identity, data: Vec<u8>) {
        self.staged.insert(id, Change::Put(data));
    }

    pub fn delete(&mut self, id: Identity) {
        self.staged.insert(id, Change::Delete);
    }

    /// Number of staged changes.
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Apply every staged change to the store in one step.
    pub fn commit(self) -> Result<(), StoreError> {
        if self.staged.is_empty() {
            return Ok(());
        }
        self.store.apply(self.staged)
    }
}
