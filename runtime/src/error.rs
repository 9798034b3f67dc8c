//! Runtime errors.

use quorum_store::StoreError;
use quorum_types::Identity;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("account {0} not found")]
    NotFound(Identity),

    #[error("account {0} already exists")]
    AlreadyExists(Identity),

    #[error("account {id} holds a {found} record, expected {expected}")]
    WrongKind {
        id: Identity,
        expected: &'static str,
        found: String,
    },

    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("{0} is not an authorized signer for this operation")]
    Unauthorized(Identity),

    #[error("token account {0} still holds a balance")]
    NonZeroBalance(Identity),

    #[error("arithmetic overflow")]
    Overflow,

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("record codec error: {0}")]
    Codec(String),
}

impl From<bincode::Error> for RuntimeError {
    fn from(e: bincode::Error) -> Self {
        Self::Codec(e.to_string())
    }
}
