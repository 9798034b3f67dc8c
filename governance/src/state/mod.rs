//! Accounts owned by the governance engine.

mod member;
mod organization;
mod proposal;
mod stake;
mod vote;

pub use member::{
    Member, MAX_REPUTATION, PROPOSAL_CREATED_REPUTATION, PROPOSAL_SUCCEEDED_REPUTATION,
    VOTE_CAST_REPUTATION, VOTE_REMOVED_REPUTATION,
};
pub use organization::{Organization, Treasury};
pub use proposal::{Proposal, ProposalKind, ProposalResult};
pub use stake::StakeAccount;
pub use vote::{Vote, VoteChoice};
