use quorum_runtime::AccountData;
use quorum_types::{Identity, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;

/// Tokens an owner has locked into an organization's vault, and the number
/// of votes currently backed by them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeAccount {
    pub owner: Identity,
    pub organization: Identity,
    pub vault: Identity,
    pub staked: TokenAmount,
    /// Votes cast against this stake that are not yet removed or cleaned up.
    /// Withdrawals are refused while this is non-zero.
    pub open_votes: u64,
    pub updated_at: Timestamp,
}

impl StakeAccount {
    pub fn new(owner: Identity, organization: Identity, vault: Identity, now: Timestamp) -> Self {
        Self {
            owner,
            organization,
            vault,
            staked: TokenAmount::ZERO,
            open_votes: 0,
            updated_at: now,
        }
    }

    pub fn deposit(&mut self, amount: TokenAmount, now: Timestamp) -> Result<(), GovernanceError> {
        self.staked = self
            .staked
            .checked_add(amount)
            .ok_or(GovernanceError::Overflow)?;
        self.updated_at = now;
        Ok(())
    }

    /// Withdrawal is refused while votes are open, and in the same tick as
    /// the previous stake change.
    pub fn withdraw(&mut self, amount: TokenAmount, now: Timestamp) -> Result<(), GovernanceError> {
        if amount > self.staked {
            return Err(GovernanceError::InsufficientStake {
                needed: amount.raw(),
                available: self.staked.raw(),
            });
        }
        if self.open_votes > 0 {
            return Err(GovernanceError::VotesOutstanding(self.open_votes));
        }
        if now <= self.updated_at {
            return Err(GovernanceError::TimingViolation {
                elapsed: self.updated_at.elapsed_since(now),
                required: 1,
            });
        }
        self.staked = self.staked.saturating_sub(amount);
        self.updated_at = now;
        Ok(())
    }

    pub fn ensure_covers(&self, weight: u64) -> Result<(), GovernanceError> {
        if weight > self.staked.raw() {
            return Err(GovernanceError::InsufficientStake {
                needed: weight,
                available: self.staked.raw(),
            });
        }
        Ok(())
    }

    pub fn open_vote(&mut self) -> Result<(), GovernanceError> {
        self.open_votes = self
            .open_votes
            .checked_add(1)
            .ok_or(GovernanceError::Overflow)?;
        Ok(())
    }

    pub fn close_vote(&mut self) -> Result<(), GovernanceError> {
        self.open_votes = self
            .open_votes
            .checked_sub(1)
            .ok_or(GovernanceError::Underflow)?;
        Ok(())
    }
}

impl AccountData for StakeAccount {
    const KIND: &'static str = "stake";
}
