//! Casting and withdrawing weighted votes.
//!
//! A vote account exists per (proposal, voter), so a second vote fails on
//! the occupied identity. Every open vote is counted on the voter's stake
//! account and keeps the stake locked until the vote is removed or cleaned
//! up.

use quorum_runtime::Transaction;
use quorum_types::Identity;

use crate::error::GovernanceError;
use crate::policy::GovernancePolicy;
use crate::seeds;
use crate::state::{Member, Proposal, StakeAccount, Vote, VoteChoice};

pub fn vote(
    tx: &mut Transaction<'_>,
    org_id: &Identity,
    id: u64,
    weight: u64,
    choice: VoteChoice,
) -> Result<Identity, GovernanceError> {
    let voter = *tx.signer();
    let proposal_id = seeds::proposal(org_id, id);
    let mut proposal: Proposal = tx.load(&proposal_id)?;
    let vote_id = seeds::vote(&proposal_id, &voter);
    if tx.exists(&vote_id)? {
        return Err(GovernanceError::AlreadyVoted);
    }
    let now = tx.now();
    if !proposal.is_open(now) {
        return Err(GovernanceError::VotingClosed);
    }
    if weight == 0 {
        return Err(GovernanceError::InvalidVoteAmount);
    }

    let stake_id = seeds::stake(org_id, &voter);
    let Some(mut stake) = tx.load_optional::<StakeAccount>(&stake_id)? else {
        return Err(GovernanceError::InsufficientStake {
            needed: weight,
            available: 0,
        });
    };
    stake.ensure_covers(weight)?;
    stake.open_vote()?;
    proposal.add_vote(choice, weight)?;

    let ballot = Vote {
        voter,
        proposal: proposal_id,
        proposal_id: id,
        weight,
        choice,
        cast_at: now,
    };
    tx.create_account(&vote_id, &voter, &ballot)?;
    tx.save(&proposal_id, &proposal)?;
    tx.save(&stake_id, &stake)?;

    let member_id = seeds::member(org_id, &voter);
    let mut member: Member = tx.load(&member_id)?;
    member.record_vote()?;
    tx.save(&member_id, &member)?;
    Ok(vote_id)
}

/// Withdraw a vote while voting is still open. Allowed only once
/// `policy.vote_cooldown` ticks have passed since it was cast.
pub fn remove_vote(
    tx: &mut Transaction<'_>,
    policy: &GovernancePolicy,
    org_id: &Identity,
    id: u64,
) -> Result<(), GovernanceError> {
    let (proposal_id, mut proposal, vote_id, ballot) = load_own_vote(tx, org_id, id)?;
    let now = tx.now();
    if !proposal.is_open(now) {
        return Err(GovernanceError::VotingClosed);
    }
    let elapsed = ballot.cast_at.elapsed_since(now);
    if elapsed < policy.vote_cooldown {
        return Err(GovernanceError::TimingViolation {
            elapsed,
            required: policy.vote_cooldown,
        });
    }

    proposal.remove_vote(ballot.choice, ballot.weight)?;
    tx.save(&proposal_id, &proposal)?;
    release_vote(tx, org_id, &vote_id, &ballot)?;

    let member_id = seeds::member(org_id, &ballot.voter);
    let mut member: Member = tx.load(&member_id)?;
    member.record_vote_removed();
    tx.save(&member_id, &member)?;
    Ok(())
}

/// Close a vote on a settled proposal. The tallies shrink but the result is
/// final. Reputation is untouched.
pub fn cleanup_vote(
    tx: &mut Transaction<'_>,
    org_id: &Identity,
    id: u64,
) -> Result<(), GovernanceError> {
    let (proposal_id, mut proposal, vote_id, ballot) = load_own_vote(tx, org_id, id)?;
    if proposal.is_pending() {
        return Err(GovernanceError::ProposalNotSettled);
    }
    proposal.remove_vote(ballot.choice, ballot.weight)?;
    tx.save(&proposal_id, &proposal)?;
    release_vote(tx, org_id, &vote_id, &ballot)
}

fn load_own_vote(
    tx: &Transaction<'_>,
    org_id: &Identity,
    id: u64,
) -> Result<(Identity, Proposal, Identity, Vote), GovernanceError> {
    let proposal_id = seeds::proposal(org_id, id);
    let proposal: Proposal = tx.load(&proposal_id)?;
    let vote_id = seeds::vote(&proposal_id, tx.signer());
    let ballot: Vote = tx.load(&vote_id)?;
    tx.require_signer(&ballot.voter)?;
    Ok((proposal_id, proposal, vote_id, ballot))
}

/// Unlock the voter's stake and close the vote account, refunding its
/// deposit to the voter.
fn release_vote(
    tx: &mut Transaction<'_>,
    org_id: &Identity,
    vote_id: &Identity,
    ballot: &Vote,
) -> Result<(), GovernanceError> {
    let stake_id = seeds::stake(org_id, &ballot.voter);
    let mut stake: StakeAccount = tx.load(&stake_id)?;
    stake.close_vote()?;
    tx.save(&stake_id, &stake)?;
    tx.close_account(vote_id, &ballot.voter)?;
    Ok(())
}
