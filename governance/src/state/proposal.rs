use quorum_runtime::AccountData;
use quorum_types::{Identity, NativeAmount, Timestamp};
use serde::{Deserialize, Serialize};

use super::vote::VoteChoice;
use crate::error::GovernanceError;

/// What happens when a proposal succeeds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalKind {
    /// Pay `amount` from the treasury to `payee`.
    Bounty { payee: Identity, amount: NativeAmount },
    /// Signal only; nothing moves on success.
    Poll,
}

/// Settlement state. Leaves `Pending` at most once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalResult {
    #[default]
    Pending,
    Succeeded,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: u64,
    pub organization: Identity,
    pub name: String,
    pub uri: String,
    pub kind: ProposalKind,
    /// Yes-weight needed to pass.
    pub threshold: u64,
    pub expiry: Timestamp,
    pub yes_votes: u64,
    pub no_votes: u64,
    pub abstain_votes: u64,
    /// Always `yes_votes + no_votes + abstain_votes`.
    pub total_votes: u64,
    pub proposer: Identity,
    pub result: ProposalResult,
    pub created_at: Timestamp,
}

impl Proposal {
    pub fn is_pending(&self) -> bool {
        self.result == ProposalResult::Pending
    }

    /// Voting is open while the proposal is pending and `now < expiry`.
    pub fn is_open(&self, now: Timestamp) -> bool {
        self.is_pending() && now < self.expiry
    }

    pub fn quorum_reached(&self, min_quorum: u64) -> bool {
        self.total_votes >= min_quorum
    }

    pub fn threshold_reached(&self) -> bool {
        self.yes_votes >= self.threshold
    }

    pub fn passes(&self, min_quorum: u64) -> bool {
        self.quorum_reached(min_quorum) && self.threshold_reached()
    }

    pub fn add_vote(&mut self, choice: VoteChoice, weight: u64) -> Result<(), GovernanceError> {
        let total = self
            .total_votes
            .checked_add(weight)
            .ok_or(GovernanceError::Overflow)?;
        let bucket = self.bucket(choice);
        *bucket = bucket.checked_add(weight).ok_or(GovernanceError::Overflow)?;
        self.total_votes = total;
        Ok(())
    }

    pub fn remove_vote(&mut self, choice: VoteChoice, weight: u64) -> Result<(), GovernanceError> {
        let total = self
            .total_votes
            .checked_sub(weight)
            .ok_or(GovernanceError::Underflow)?;
        let bucket = self.bucket(choice);
        *bucket = bucket.checked_sub(weight).ok_or(GovernanceError::Underflow)?;
        self.total_votes = total;
        Ok(())
    }

    pub fn settle(&mut self, result: ProposalResult) -> Result<(), GovernanceError> {
        if !self.is_pending() {
            return Err(GovernanceError::AlreadyExecuted);
        }
        self.result = result;
        Ok(())
    }

    fn bucket(&mut self, choice: VoteChoice) -> &mut u64 {
        match choice {
            VoteChoice::Yes => &mut self.yes_votes,
            VoteChoice::No => &mut self.no_votes,
            VoteChoice::Abstain => &mut self.abstain_votes,
        }
    }
}

impl AccountData for Proposal {
    const KIND: &'static str = "proposal";
}
