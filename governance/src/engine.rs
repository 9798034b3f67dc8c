//! Public surface of the governance engine.
//!
//! Each state-changing method runs its operation as one runtime
//! transaction signed by the calling identity: it either commits in full or
//! leaves no trace. Operations are serialized by the runtime.

use quorum_runtime::{NativeLedger, Runtime};
use quorum_store::AccountStore;
use quorum_types::{Clock, Identity, NativeAmount, OrganizationParams, TokenAmount};
use tracing::{info, warn};

use crate::error::GovernanceError;
use crate::lifecycle::{self, NewProposal};
use crate::policy::GovernancePolicy;
use crate::spans;
use crate::state::{Member, Organization, ProposalResult, StakeAccount, VoteChoice};
use crate::views::{self, ProposalResults};
use crate::{setup, staking, voting};

pub struct GovernanceEngine<S, C> {
    runtime: Runtime<S, C>,
    policy: GovernancePolicy,
}

impl<S: AccountStore, C: Clock> GovernanceEngine<S, C> {
    pub fn new(runtime: Runtime<S, C>, policy: GovernancePolicy) -> Self {
        Self { runtime, policy }
    }

    pub fn runtime(&self) -> &Runtime<S, C> {
        &self.runtime
    }

    pub fn policy(&self) -> &GovernancePolicy {
        &self.policy
    }

    // ── Organization setup ─────────────────────────────────────────────

    pub fn initialize(
        &self,
        initializer: &Identity,
        seed: u64,
        params: OrganizationParams,
    ) -> Result<Identity, GovernanceError> {
        let _span = spans::operation_span("initialize", &Identity::ZERO, initializer).entered();
        let org = logged(
            "initialize",
            self.runtime
                .execute(initializer, |tx| setup::initialize(tx, seed, params)),
        )?;
        info!(org = %org.short(), seed, "organization initialized");
        Ok(org)
    }

    pub fn issue_tokens(&self, buyer: &Identity, org: &Identity) -> Result<TokenAmount, GovernanceError> {
        let _span = spans::operation_span("issue_tokens", org, buyer).entered();
        let amount = logged(
            "issue_tokens",
            self.runtime.execute(buyer, |tx| setup::issue_tokens(tx, org)),
        )?;
        info!(amount = amount.raw(), "tokens issued");
        Ok(amount)
    }

    // ── Staking ────────────────────────────────────────────────────────

    pub fn init_stake(&self, owner: &Identity, org: &Identity) -> Result<Identity, GovernanceError> {
        let _span = spans::operation_span("init_stake", org, owner).entered();
        let stake = logged(
            "init_stake",
            self.runtime.execute(owner, |tx| staking::init_stake(tx, org)),
        )?;
        info!(stake = %stake.short(), "stake account opened");
        Ok(stake)
    }

    /// Returns the owner's total stake after the deposit.
    pub fn stake_tokens(
        &self,
        owner: &Identity,
        org: &Identity,
        amount: TokenAmount,
    ) -> Result<TokenAmount, GovernanceError> {
        let _span = spans::operation_span("stake_tokens", org, owner).entered();
        let staked = logged(
            "stake_tokens",
            self.runtime
                .execute(owner, |tx| staking::stake_tokens(tx, org, amount)),
        )?;
        info!(amount = amount.raw(), staked = staked.raw(), "tokens staked");
        Ok(staked)
    }

    /// Returns the owner's remaining stake.
    pub fn unstake_tokens(
        &self,
        owner: &Identity,
        org: &Identity,
        amount: TokenAmount,
    ) -> Result<TokenAmount, GovernanceError> {
        let _span = spans::operation_span("unstake_tokens", org, owner).entered();
        let staked = logged(
            "unstake_tokens",
            self.runtime
                .execute(owner, |tx| staking::unstake_tokens(tx, org, amount)),
        )?;
        info!(amount = amount.raw(), staked = staked.raw(), "tokens unstaked");
        Ok(staked)
    }

    pub fn close_stake_account(&self, owner: &Identity, org: &Identity) -> Result<(), GovernanceError> {
        let _span = spans::operation_span("close_stake_account", org, owner).entered();
        logged(
            "close_stake_account",
            self.runtime
                .execute(owner, |tx| staking::close_stake_account(tx, org)),
        )?;
        info!("stake account closed");
        Ok(())
    }

    // ── Proposals ──────────────────────────────────────────────────────

    pub fn create_proposal(
        &self,
        proposer: &Identity,
        org: &Identity,
        args: NewProposal,
    ) -> Result<Identity, GovernanceError> {
        let id = args.id;
        let _span = spans::proposal_span("create_proposal", org, proposer, id).entered();
        let proposal = logged(
            "create_proposal",
            self.runtime.execute(proposer, |tx| {
                lifecycle::create_proposal(tx, &self.policy, org, args)
            }),
        )?;
        info!(proposal = %proposal.short(), "proposal created");
        Ok(proposal)
    }

    pub fn execute_proposal(
        &self,
        executor: &Identity,
        org: &Identity,
        id: u64,
        payee: Option<Identity>,
    ) -> Result<ProposalResult, GovernanceError> {
        let _span = spans::proposal_span("execute_proposal", org, executor, id).entered();
        let outcome = logged(
            "execute_proposal",
            self.runtime.execute(executor, |tx| {
                lifecycle::execute_proposal(tx, &self.policy, org, id, payee)
            }),
        )?;
        info!(?outcome, "proposal settled");
        Ok(outcome)
    }

    /// Returns the refunded storage deposit.
    pub fn cleanup_proposal(
        &self,
        caller: &Identity,
        org: &Identity,
        id: u64,
    ) -> Result<NativeAmount, GovernanceError> {
        let _span = spans::proposal_span("cleanup_proposal", org, caller, id).entered();
        let refund = logged(
            "cleanup_proposal",
            self.runtime
                .execute(caller, |tx| lifecycle::cleanup_proposal(tx, org, id)),
        )?;
        info!(refund = refund.raw(), "proposal cleaned up");
        Ok(refund)
    }

    // ── Votes ──────────────────────────────────────────────────────────

    pub fn vote(
        &self,
        voter: &Identity,
        org: &Identity,
        id: u64,
        weight: u64,
        choice: VoteChoice,
    ) -> Result<Identity, GovernanceError> {
        let _span = spans::proposal_span("vote", org, voter, id).entered();
        let vote = logged(
            "vote",
            self.runtime
                .execute(voter, |tx| voting::vote(tx, org, id, weight, choice)),
        )?;
        info!(weight, ?choice, "vote cast");
        Ok(vote)
    }

    pub fn remove_vote(&self, voter: &Identity, org: &Identity, id: u64) -> Result<(), GovernanceError> {
        let _span = spans::proposal_span("remove_vote", org, voter, id).entered();
        logged(
            "remove_vote",
            self.runtime
                .execute(voter, |tx| voting::remove_vote(tx, &self.policy, org, id)),
        )?;
        info!("vote removed");
        Ok(())
    }

    pub fn cleanup_vote(&self, voter: &Identity, org: &Identity, id: u64) -> Result<(), GovernanceError> {
        let _span = spans::proposal_span("cleanup_vote", org, voter, id).entered();
        logged(
            "cleanup_vote",
            self.runtime
                .execute(voter, |tx| voting::cleanup_vote(tx, org, id)),
        )?;
        info!("vote cleaned up");
        Ok(())
    }

    // ── Views ──────────────────────────────────────────────────────────

    pub fn get_proposal_results(&self, org: &Identity, id: u64) -> Result<ProposalResults, GovernanceError> {
        let _span = spans::view_span("proposal_results").entered();
        self.runtime.view(|tx| views::proposal_results(tx, org, id))
    }

    pub fn get_member_state(&self, org: &Identity, owner: &Identity) -> Result<Member, GovernanceError> {
        let _span = spans::view_span("member_state").entered();
        self.runtime.view(|tx| views::member_state(tx, org, owner))
    }

    pub fn organization(&self, org: &Identity) -> Result<Organization, GovernanceError> {
        self.runtime.view(|tx| views::organization(tx, org))
    }

    pub fn stake_account(&self, org: &Identity, owner: &Identity) -> Result<StakeAccount, GovernanceError> {
        self.runtime.view(|tx| views::stake_account(tx, org, owner))
    }

    pub fn treasury_balance(&self, org: &Identity) -> Result<NativeAmount, GovernanceError> {
        self.runtime.view(|tx| views::treasury_balance(tx, org))
    }

    pub fn token_balance(&self, org: &Identity, holder: &Identity) -> Result<TokenAmount, GovernanceError> {
        self.runtime.view(|tx| views::token_balance(tx, org, holder))
    }

    pub fn token_supply(&self, org: &Identity) -> Result<TokenAmount, GovernanceError> {
        self.runtime.view(|tx| views::token_supply(tx, org))
    }

    pub fn native_balance(&self, owner: &Identity) -> Result<NativeAmount, GovernanceError> {
        Ok(self.runtime.view(|tx| tx.native_balance(owner))?)
    }
}

fn logged<T>(op: &'static str, result: Result<T, GovernanceError>) -> Result<T, GovernanceError> {
    if let Err(e) = &result {
        warn!(op, error = %e, "operation rejected");
    }
    result
}
