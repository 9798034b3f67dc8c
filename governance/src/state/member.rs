use quorum_runtime::AccountData;
use quorum_types::{Identity, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;

pub const MAX_REPUTATION: u64 = 10_000;
pub const VOTE_CAST_REPUTATION: i64 = 1;
pub const VOTE_REMOVED_REPUTATION: i64 = -2;
pub const PROPOSAL_CREATED_REPUTATION: i64 = 5;
pub const PROPOSAL_SUCCEEDED_REPUTATION: i64 = 20;

/// Participation record of one owner within one organization.
///
/// `reward_points` only ever grows; it changes solely when a proposal this
/// member created succeeds. `reputation_score` moves both ways and stays
/// within `0..=MAX_REPUTATION`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub owner: Identity,
    pub organization: Identity,
    pub reward_points: u64,
    pub total_votes_cast: u64,
    pub proposals_created: u64,
    pub successful_proposals: u64,
    pub reputation_score: u64,
    pub joined_at: Timestamp,
}

impl Member {
    pub fn new(owner: Identity, organization: Identity, joined_at: Timestamp) -> Self {
        Self {
            owner,
            organization,
            reward_points: 0,
            total_votes_cast: 0,
            proposals_created: 0,
            successful_proposals: 0,
            reputation_score: 0,
            joined_at,
        }
    }

    pub fn record_vote(&mut self) -> Result<(), GovernanceError> {
        self.total_votes_cast = bump(self.total_votes_cast)?;
        self.adjust_reputation(VOTE_CAST_REPUTATION);
        Ok(())
    }

    /// `total_votes_cast` counts participation and is not rolled back.
    pub fn record_vote_removed(&mut self) {
        self.adjust_reputation(VOTE_REMOVED_REPUTATION);
    }

    pub fn record_proposal_created(&mut self) -> Result<(), GovernanceError> {
        self.proposals_created = bump(self.proposals_created)?;
        self.adjust_reputation(PROPOSAL_CREATED_REPUTATION);
        Ok(())
    }

    pub fn record_success(&mut self, points: u64) -> Result<(), GovernanceError> {
        self.reward_points = self
            .reward_points
            .checked_add(points)
            .ok_or(GovernanceError::Overflow)?;
        self.successful_proposals = bump(self.successful_proposals)?;
        self.adjust_reputation(PROPOSAL_SUCCEEDED_REPUTATION);
        Ok(())
    }

    pub fn adjust_reputation(&mut self, delta: i64) {
        let score = if delta >= 0 {
            self.reputation_score.saturating_add(delta.unsigned_abs())
        } else {
            self.reputation_score.saturating_sub(delta.unsigned_abs())
        };
        self.reputation_score = score.min(MAX_REPUTATION);
    }
}

fn bump(counter: u64) -> Result<u64, GovernanceError> {
    counter.checked_add(1).ok_or(GovernanceError::Overflow)
}

impl AccountData for Member {
    const KIND: &'static str = "member";
}
