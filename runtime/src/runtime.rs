//! The execution environment: serializes operations and applies each one
//! in full or not at all.

use crate::config::RuntimeConfig;
use crate::error::RuntimeError;
use crate::ledger::NativeLedger;
use crate::transaction::Transaction;
use quorum_store::AccountStore;
use quorum_types::{Clock, Identity, NativeAmount, Timestamp};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

pub struct Runtime<S, C> {
    store: S,
    clock: C,
    config: RuntimeConfig,
    /// Held for the whole read-modify-commit cycle of one operation.
    exec_lock: Mutex<()>,
}

impl<S: AccountStore, C: Clock> Runtime<S, C> {
    pub fn new(store: S, clock: C, config: RuntimeConfig) -> Self {
        Self {
            store,
            clock,
            config,
            exec_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Run `op` as one atomic transaction signed by `signer`.
    ///
    /// The staged writes are committed only if `op` returns `Ok`; on `Err`
    /// they are discarded and the store is exactly as before.
    pub fn execute<T, E, F>(&self, signer: &Identity, op: F) -> Result<T, E>
    where
        F: FnOnce(&mut Transaction<'_>) -> Result<T, E>,
        E: From<RuntimeError>,
    {
        let _guard = self
            .exec_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut tx = Transaction::new(&self.store, *signer, self.clock.now(), &self.config);
        match op(&mut tx) {
            Ok(value) => {
                let changes = tx.pending_changes();
                tx.commit()
                    .map_err(|e| E::from(RuntimeError::from(e)))?;
                debug!(signer = %signer.short(), changes, "transaction committed");
                Ok(value)
            }
            Err(e) => {
                debug!(signer = %signer.short(), "transaction rolled back");
                Err(e)
            }
        }
    }

    /// Run a read-only query against committed state.
    pub fn view<T, E, F>(&self, op: F) -> Result<T, E>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, E>,
    {
        let tx = Transaction::new(&self.store, Identity::ZERO, self.clock.now(), &self.config);
        op(&tx)
    }

    /// Fund an external identity with native currency (genesis / faucet).
    pub fn airdrop(&self, to: &Identity, amount: NativeAmount) -> Result<(), RuntimeError> {
        self.execute(to, |tx| tx.credit_native(to, amount))
    }
}
