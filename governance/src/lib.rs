//! Token-weighted governance for a single organization.
//!
//! Members buy governance tokens from the organization's treasury, stake
//! them into a vault, and vote on proposals with weight bounded by their
//! stake. A proposal settles exactly once; a successful bounty pays out of
//! the treasury and credits the proposer's reward points.
//!
//! Every operation runs as one [`quorum_runtime::Transaction`]. The
//! operation modules (`setup`, `staking`, `lifecycle`, `voting`, `views`)
//! are plain functions over a transaction; [`GovernanceEngine`] wraps them
//! with spans, logging and commit handling.

pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod policy;
pub mod seeds;
pub mod setup;
pub mod spans;
pub mod staking;
pub mod state;
pub mod views;
pub mod voting;

pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use lifecycle::NewProposal;
pub use policy::{ExecutionGate, GovernancePolicy, RewardCurve};
pub use state::{
    Member, Organization, Proposal, ProposalKind, ProposalResult, StakeAccount, Treasury, Vote,
    VoteChoice,
};
pub use views::ProposalResults;
