//! Read-only queries. None of these mutate state.

use quorum_runtime::{NativeLedger, TokenLedger, Transaction};
use quorum_types::{Identity, NativeAmount, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;
use crate::seeds;
use crate::setup::load_organization;
use crate::state::{Member, Organization, Proposal, ProposalKind, ProposalResult, StakeAccount};

/// Snapshot of a proposal's tally, with the pass conditions evaluated
/// against the current time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalResults {
    pub id: u64,
    pub name: String,
    pub uri: String,
    pub kind: ProposalKind,
    pub proposer: Identity,
    pub threshold: u64,
    pub expiry: Timestamp,
    pub yes_votes: u64,
    pub no_votes: u64,
    pub abstain_votes: u64,
    pub total_votes: u64,
    pub result: ProposalResult,
    pub quorum_reached: bool,
    pub threshold_reached: bool,
    pub voting_open: bool,
}

pub fn proposal_results(
    tx: &Transaction<'_>,
    org_id: &Identity,
    id: u64,
) -> Result<ProposalResults, GovernanceError> {
    let org = load_organization(tx, org_id)?;
    let p: Proposal = tx.load(&seeds::proposal(org_id, id))?;
    Ok(ProposalResults {
        quorum_reached: p.quorum_reached(org.params.min_quorum),
        threshold_reached: p.threshold_reached(),
        voting_open: p.is_open(tx.now()),
        id: p.id,
        name: p.name,
        uri: p.uri,
        kind: p.kind,
        proposer: p.proposer,
        threshold: p.threshold,
        expiry: p.expiry,
        yes_votes: p.yes_votes,
        no_votes: p.no_votes,
        abstain_votes: p.abstain_votes,
        total_votes: p.total_votes,
        result: p.result,
    })
}

pub fn member_state(
    tx: &Transaction<'_>,
    org_id: &Identity,
    owner: &Identity,
) -> Result<Member, GovernanceError> {
    Ok(tx.load(&seeds::member(org_id, owner))?)
}

pub fn organization(tx: &Transaction<'_>, org_id: &Identity) -> Result<Organization, GovernanceError> {
    load_organization(tx, org_id)
}

pub fn stake_account(
    tx: &Transaction<'_>,
    org_id: &Identity,
    owner: &Identity,
) -> Result<StakeAccount, GovernanceError> {
    Ok(tx.load(&seeds::stake(org_id, owner))?)
}

pub fn treasury_balance(tx: &Transaction<'_>, org_id: &Identity) -> Result<NativeAmount, GovernanceError> {
    let org = load_organization(tx, org_id)?;
    Ok(tx.native_balance(&org.treasury)?)
}

pub fn token_balance(
    tx: &Transaction<'_>,
    org_id: &Identity,
    holder: &Identity,
) -> Result<TokenAmount, GovernanceError> {
    let org = load_organization(tx, org_id)?;
    Ok(tx.token_balance(&org.mint, holder)?)
}

pub fn token_supply(tx: &Transaction<'_>, org_id: &Identity) -> Result<TokenAmount, GovernanceError> {
    let org = load_organization(tx, org_id)?;
    Ok(tx.token_supply(&org.mint)?)
}
