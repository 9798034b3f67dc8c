use quorum_runtime::RuntimeError;
use quorum_types::{Identity, ParamsError, Timestamp};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovernanceError {
    #[error("organization {0} is already initialized")]
    AlreadyInitialized(Identity),

    #[error("account {0} already exists")]
    AlreadyExists(Identity),

    #[error("issuing {requested} tokens would exceed max supply ({supply} of {max_supply} issued)")]
    SupplyExceeded {
        requested: u64,
        supply: u64,
        max_supply: u64,
    },

    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("insufficient stake: need {needed}, have {available}")]
    InsufficientStake { needed: u64, available: u64 },

    #[error("stake account still holds {0} tokens")]
    NonZeroStake(u64),

    #[error("voter has already voted on this proposal")]
    AlreadyVoted,

    #[error("proposal has already been executed")]
    AlreadyExecuted,

    #[error("too soon: {elapsed} ticks elapsed, {required} required")]
    TimingViolation { elapsed: u64, required: u64 },

    #[error("expiry window of {requested} ticks exceeds the maximum of {max}")]
    ExpiryTooFar { requested: u64, max: u64 },

    #[error("arithmetic overflow")]
    Overflow,

    #[error("arithmetic underflow")]
    Underflow,

    #[error("account {0} not found")]
    NotFound(Identity),

    #[error("{0} is not authorized for this account")]
    Unauthorized(Identity),

    #[error("proposal name is {len} bytes, limit is {max}")]
    InvalidName { len: usize, max: usize },

    #[error("proposal uri is {len} bytes, limit is {max}")]
    InvalidUri { len: usize, max: usize },

    #[error("vote weight must be non-zero")]
    InvalidVoteAmount,

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("proposal id must be {expected}, got {got}")]
    InvalidProposalId { expected: u64, got: u64 },

    #[error("invalid organization parameters: {0}")]
    InvalidParams(#[from] ParamsError),

    #[error("voting on this proposal is closed")]
    VotingClosed,

    #[error("voting is still open until {expiry}")]
    VotingInProgress { expiry: Timestamp },

    #[error("proposal has not been executed yet")]
    ProposalNotSettled,

    #[error("{0} votes are still outstanding")]
    VotesOutstanding(u64),

    #[error("payee does not match the proposal's bounty payee")]
    PayeeMismatch,

    #[error("account {0} does not match its derived identity")]
    InvalidAccount(Identity),

    #[error("runtime error: {0}")]
    Runtime(RuntimeError),
}

impl From<RuntimeError> for GovernanceError {
    fn from(e: RuntimeError) -> Self {
        match e {
            RuntimeError::NotFound(id) => Self::NotFound(id),
            RuntimeError::AlreadyExists(id) => Self::AlreadyExists(id),
            RuntimeError::InsufficientFunds { needed, available } => {
                Self::InsufficientFunds { needed, available }
            }
            RuntimeError::Unauthorized(id) => Self::Unauthorized(id),
            RuntimeError::Overflow => Self::Overflow,
            RuntimeError::WrongKind { id, .. } => Self::InvalidAccount(id),
            other => Self::Runtime(other),
        }
    }
}
