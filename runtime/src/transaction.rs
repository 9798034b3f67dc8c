//! A single all-or-nothing unit of work.

use crate::config::RuntimeConfig;
use crate::error::RuntimeError;
use crate::ledger::NativeLedger;
use crate::record::{AccountData, Envelope};
use quorum_store::{AccountStore, StoreError, WriteBatch};
use quorum_types::{Identity, NativeAmount, Timestamp};

/// The view an operation has of the world while it runs.
///
/// Created by [`crate::Runtime::execute`]; every write is staged and reaches
/// the store only when the operation succeeds. `now` is sampled once when the
/// transaction starts, so an operation observes a single instant.
pub struct Transaction<'a> {
    batch: WriteBatch<'a>,
    signer: Identity,
    now: Timestamp,
    config: &'a RuntimeConfig,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(
        store: &'a dyn AccountStore,
        signer: Identity,
        now: Timestamp,
        config: &'a RuntimeConfig,
    ) -> Self {
        Self {
            batch: WriteBatch::new(store),
            signer,
            now,
            config,
        }
    }

    /// The identity that signed this transaction.
    pub fn signer(&self) -> &Identity {
        &self.signer
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    pub fn config(&self) -> &RuntimeConfig {
        self.config
    }

    pub fn require_signer(&self, id: &Identity) -> Result<(), RuntimeError> {
        if self.signer != *id {
            return Err(RuntimeError::Unauthorized(self.signer));
        }
        Ok(())
    }

    pub fn exists(&self, id: &Identity) -> Result<bool, RuntimeError> {
        Ok(self.batch.exists(id)?)
    }

    /// Load a typed record; `NotFound` if absent.
    pub fn load<T: AccountData>(&self, id: &Identity) -> Result<T, RuntimeError> {
        self.load_optional(id)?.ok_or(RuntimeError::NotFound(*id))
    }

    pub fn load_optional<T: AccountData>(&self, id: &Identity) -> Result<Option<T>, RuntimeError> {
        let Some(envelope) = self.read_envelope(id)? else {
            return Ok(None);
        };
        if envelope.kind != T::KIND {
            return Err(RuntimeError::WrongKind {
                id: *id,
                expected: T::KIND,
                found: envelope.kind,
            });
        }
        Ok(Some(bincode::deserialize(&envelope.data)?))
    }

    /// Overwrite an existing record of the same kind, keeping its deposit.
    pub fn save<T: AccountData>(&mut self, id: &Identity, value: &T) -> Result<(), RuntimeError> {
        let envelope = self
            .read_envelope(id)?
            .ok_or(RuntimeError::NotFound(*id))?;
        if envelope.kind != T::KIND {
            return Err(RuntimeError::WrongKind {
                id: *id,
                expected: T::KIND,
                found: envelope.kind,
            });
        }
        self.write_envelope(id, envelope.deposit, value)
    }

    /// Create a record at `id`, charging the storage deposit to `payer`.
    ///
    /// Fails with `AlreadyExists` if the identity is occupied; this is what
    /// makes every derived identity unique.
    pub fn create_account<T: AccountData>(
        &mut self,
        id: &Identity,
        payer: &Identity,
        value: &T,
    ) -> Result<(), RuntimeError> {
        if self.exists(id)? {
            return Err(RuntimeError::AlreadyExists(*id));
        }
        let deposit = self.config.storage_deposit;
        if !deposit.is_zero() {
            self.debit_native(payer, deposit)?;
        }
        self.write_envelope(id, deposit, value)
    }

    /// Destroy the record at `id` and refund its deposit to `recipient`.
    pub fn close_account(
        &mut self,
        id: &Identity,
        recipient: &Identity,
    ) -> Result<NativeAmount, RuntimeError> {
        let envelope = self
            .read_envelope(id)?
            .ok_or(RuntimeError::NotFound(*id))?;
        self.batch.delete(*id);
        if !envelope.deposit.is_zero() {
            self.credit_native(recipient, envelope.deposit)?;
        }
        Ok(envelope.deposit)
    }

    /// Number of accounts this transaction has modified so far.
    pub fn pending_changes(&self) -> usize {
        self.batch.len()
    }

    pub(crate) fn commit(self) -> Result<(), StoreError> {
        self.batch.commit()
    }

    /// Write a ledger record, creating it without a deposit if absent.
    pub(crate) fn put_record<T: AccountData>(
        &mut self,
        id: &Identity,
        value: &T,
    ) -> Result<(), RuntimeError> {
        let deposit = match self.read_envelope(id)? {
            Some(envelope) if envelope.kind != T::KIND => {
                return Err(RuntimeError::WrongKind {
                    id: *id,
                    expected: T::KIND,
                    found: envelope.kind,
                })
            }
            Some(envelope) => envelope.deposit,
            None => NativeAmount::ZERO,
        };
        self.write_envelope(id, deposit, value)
    }

    fn read_envelope(&self, id: &Identity) -> Result<Option<Envelope>, RuntimeError> {
        match self.batch.get(id)? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    fn write_envelope<T: AccountData>(
        &mut self,
        id: &Identity,
        deposit: NativeAmount,
        value: &T,
    ) -> Result<(), RuntimeError> {
        let envelope = Envelope {
            kind: T::KIND.to_string(),
            deposit,
            data: bincode::serialize(value)?,
        };
        self.batch.put(*id, bincode::serialize(&envelope)?);
        Ok(())
    }
}
