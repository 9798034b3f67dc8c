//! Proposal creation, settlement and cleanup.

use quorum_runtime::{NativeLedger, Transaction};
use quorum_types::{Identity, NativeAmount};
use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;
use crate::policy::{ExecutionGate, GovernancePolicy};
use crate::seeds;
use crate::setup::load_organization;
use crate::state::{Member, Proposal, ProposalKind, ProposalResult, StakeAccount};

/// Arguments of `create_proposal`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProposal {
    pub id: u64,
    pub name: String,
    pub uri: String,
    pub kind: ProposalKind,
    pub threshold: u64,
    /// Length of the voting window in ticks.
    pub expiry_offset: u64,
}

pub fn create_proposal(
    tx: &mut Transaction<'_>,
    policy: &GovernancePolicy,
    org_id: &Identity,
    args: NewProposal,
) -> Result<Identity, GovernanceError> {
    let mut org = load_organization(tx, org_id)?;
    let proposer = *tx.signer();

    let staked = tx
        .load_optional::<StakeAccount>(&seeds::stake(org_id, &proposer))?
        .map(|s| s.staked.raw())
        .unwrap_or(0);
    if staked == 0 {
        return Err(GovernanceError::InsufficientStake {
            needed: 1,
            available: 0,
        });
    }
    if args.name.len() > policy.max_name_len {
        return Err(GovernanceError::InvalidName {
            len: args.name.len(),
            max: policy.max_name_len,
        });
    }
    if args.uri.len() > policy.max_uri_len {
        return Err(GovernanceError::InvalidUri {
            len: args.uri.len(),
            max: policy.max_uri_len,
        });
    }
    org.check_expiry_offset(args.expiry_offset)?;

    let proposal_id = seeds::proposal(org_id, args.id);
    if tx.exists(&proposal_id)? {
        return Err(GovernanceError::AlreadyExists(proposal_id));
    }
    if args.id != org.next_proposal_id() {
        return Err(GovernanceError::InvalidProposalId {
            expected: org.next_proposal_id(),
            got: args.id,
        });
    }

    tx.transfer_native(&proposer, &org.treasury, org.params.proposal_fee)?;

    let now = tx.now();
    let expiry = now
        .checked_add(args.expiry_offset)
        .ok_or(GovernanceError::Overflow)?;
    let proposal = Proposal {
        id: args.id,
        organization: *org_id,
        name: args.name,
        uri: args.uri,
        kind: args.kind,
        threshold: args.threshold,
        expiry,
        yes_votes: 0,
        no_votes: 0,
        abstain_votes: 0,
        total_votes: 0,
        proposer,
        result: ProposalResult::Pending,
        created_at: now,
    };
    tx.create_account(&proposal_id, &proposer, &proposal)?;

    org.record_proposal()?;
    tx.save(org_id, &org)?;

    let member_id = seeds::member(org_id, &proposer);
    let mut member: Member = tx.load(&member_id)?;
    member.record_proposal_created()?;
    tx.save(&member_id, &member)?;
    Ok(proposal_id)
}

/// Settle a pending proposal.
///
/// Under [`ExecutionGate::QuorumOrExpiry`] a proposal that has met quorum
/// and threshold succeeds immediately; otherwise it waits for expiry and
/// then succeeds or fails on the final tally. A successful bounty pays out
/// of the treasury to `payee`, which must match the proposal's payee.
pub fn execute_proposal(
    tx: &mut Transaction<'_>,
    policy: &GovernancePolicy,
    org_id: &Identity,
    id: u64,
    payee: Option<Identity>,
) -> Result<ProposalResult, GovernanceError> {
    let org = load_organization(tx, org_id)?;
    let proposal_id = seeds::proposal(org_id, id);
    let mut proposal: Proposal = tx.load(&proposal_id)?;
    if !proposal.is_pending() {
        return Err(GovernanceError::AlreadyExecuted);
    }

    let passed = proposal.passes(org.params.min_quorum);
    let expired = tx.now() >= proposal.expiry;
    let outcome = match policy.execution {
        ExecutionGate::QuorumOrExpiry if passed => ProposalResult::Succeeded,
        _ if !expired => {
            return Err(GovernanceError::VotingInProgress {
                expiry: proposal.expiry,
            })
        }
        _ if passed => ProposalResult::Succeeded,
        _ => ProposalResult::Failed,
    };

    if outcome == ProposalResult::Succeeded {
        if let ProposalKind::Bounty {
            payee: expected,
            amount,
        } = proposal.kind
        {
            if payee != Some(expected) {
                return Err(GovernanceError::PayeeMismatch);
            }
            tx.transfer_native(&org.treasury, &expected, amount)?;
        }
        reward_proposer(tx, policy, org_id, &proposal)?;
    }

    proposal.settle(outcome)?;
    tx.save(&proposal_id, &proposal)?;
    Ok(outcome)
}

/// Close a settled proposal with no outstanding votes, refunding its
/// deposit to the signer.
pub fn cleanup_proposal(
    tx: &mut Transaction<'_>,
    org_id: &Identity,
    id: u64,
) -> Result<NativeAmount, GovernanceError> {
    let proposal_id = seeds::proposal(org_id, id);
    let proposal: Proposal = tx.load(&proposal_id)?;
    if proposal.is_pending() {
        return Err(GovernanceError::ProposalNotSettled);
    }
    if proposal.total_votes > 0 {
        return Err(GovernanceError::VotesOutstanding(proposal.total_votes));
    }
    let recipient = *tx.signer();
    Ok(tx.close_account(&proposal_id, &recipient)?)
}

fn reward_proposer(
    tx: &mut Transaction<'_>,
    policy: &GovernancePolicy,
    org_id: &Identity,
    proposal: &Proposal,
) -> Result<(), GovernanceError> {
    let points = policy
        .reward
        .points(proposal.total_votes)
        .ok_or(GovernanceError::Overflow)?;
    let member_id = seeds::member(org_id, &proposal.proposer);
    let mut member: Member = tx.load(&member_id)?;
    member.record_success(points)?;
    tx.save(&member_id, &member)?;
    Ok(())
}
