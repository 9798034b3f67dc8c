//! Scenario replay.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Context;
use quorum_crypto::identity_from_label;
use quorum_governance::{
    GovernanceEngine, GovernanceError, NewProposal, ProposalKind, ProposalResult,
};
use quorum_nullables::{NullClock, NullStore};
use quorum_runtime::Runtime;
use quorum_types::{Identity, NativeAmount, TokenAmount};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::config::SimulationConfig;
use crate::scenario::{Scenario, Step};

/// Engine plus the name book that maps actor names to identities.
pub struct Simulator {
    engine: GovernanceEngine<NullStore, NullClock>,
    clock: NullClock,
    org: Identity,
    names: BTreeMap<Identity, String>,
}

#[derive(Debug, Serialize)]
struct StepReport<'a> {
    step: usize,
    op: &'static str,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    actor: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct ProposalSummary {
    pub id: u64,
    pub name: String,
    pub proposer: String,
    pub result: ProposalResult,
    pub yes_votes: u64,
    pub no_votes: u64,
    pub abstain_votes: u64,
    pub total_votes: u64,
}

#[derive(Debug, Serialize)]
pub struct MemberSummary {
    pub staked: u64,
    pub tokens: u64,
    pub native: u64,
    pub reward_points: u64,
    pub total_votes_cast: u64,
    pub proposals_created: u64,
    pub successful_proposals: u64,
    pub reputation_score: u64,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub organization: String,
    pub tick: u64,
    pub treasury: u64,
    pub token_supply: u64,
    pub proposals: Vec<ProposalSummary>,
    pub members: BTreeMap<String, MemberSummary>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub applied: usize,
    pub failed: usize,
}

impl Simulator {
    /// Fund the configured accounts and initialize the organization.
    pub fn new(config: &SimulationConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let clock = NullClock::new(config.start_tick);
        let runtime = Runtime::new(NullStore::new(), clock.clone(), config.runtime.clone());
        let engine = GovernanceEngine::new(runtime, config.policy.clone());

        let mut names = BTreeMap::new();
        for account in &config.accounts {
            let id = identity_from_label(&account.name);
            engine
                .runtime()
                .airdrop(&id, NativeAmount::new(account.native))
                .with_context(|| format!("failed to fund {}", account.name))?;
            names.insert(id, account.name.clone());
        }

        let initializer = identity_from_label(&config.organization.initializer);
        let org = engine
            .initialize(
                &initializer,
                config.organization.seed,
                config.organization.params.clone(),
            )
            .context("failed to initialize organization")?;
        info!(org = %org.short(), accounts = names.len(), "simulation ready");

        Ok(Self {
            engine,
            clock,
            org,
            names,
        })
    }

    pub fn organization(&self) -> &Identity {
        &self.org
    }

    pub fn engine(&self) -> &GovernanceEngine<NullStore, NullClock> {
        &self.engine
    }

    fn actor(&mut self, name: &str) -> Identity {
        let id = identity_from_label(name);
        self.names.entry(id).or_insert_with(|| name.to_string());
        id
    }

    fn name_of(&self, id: &Identity) -> String {
        self.names
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.short())
    }

    /// Apply one step and describe its result as JSON.
    pub fn apply(&mut self, step: &Step) -> Result<Value, GovernanceError> {
        let org = self.org;
        match step {
            Step::Issue { actor } => {
                let who = self.actor(actor);
                let amount = self.engine.issue_tokens(&who, &org)?;
                Ok(json!({ "issued": amount.raw() }))
            }
            Step::InitStake { actor } => {
                let who = self.actor(actor);
                let stake = self.engine.init_stake(&who, &org)?;
                Ok(json!({ "stake_account": stake.to_string() }))
            }
            Step::Stake { actor, amount } => {
                let who = self.actor(actor);
                let staked = self
                    .engine
                    .stake_tokens(&who, &org, TokenAmount::new(*amount))?;
                Ok(json!({ "staked": staked.raw() }))
            }
            Step::Unstake { actor, amount } => {
                let who = self.actor(actor);
                let staked = self
                    .engine
                    .unstake_tokens(&who, &org, TokenAmount::new(*amount))?;
                Ok(json!({ "staked": staked.raw() }))
            }
            Step::CloseStake { actor } => {
                let who = self.actor(actor);
                self.engine.close_stake_account(&who, &org)?;
                Ok(Value::Null)
            }
            Step::CreateProposal {
                actor,
                id,
                name,
                uri,
                threshold,
                expiry_offset,
                bounty,
            } => {
                let who = self.actor(actor);
                let kind = match bounty {
                    Some(b) => ProposalKind::Bounty {
                        payee: self.actor(&b.payee),
                        amount: NativeAmount::new(b.amount),
                    },
                    None => ProposalKind::Poll,
                };
                let args = NewProposal {
                    id: *id,
                    name: name.clone(),
                    uri: uri.clone(),
                    kind,
                    threshold: *threshold,
                    expiry_offset: *expiry_offset,
                };
                let proposal = self.engine.create_proposal(&who, &org, args)?;
                Ok(json!({ "proposal": proposal.to_string() }))
            }
            Step::Vote {
                actor,
                id,
                weight,
                choice,
            } => {
                let who = self.actor(actor);
                self.engine.vote(&who, &org, *id, *weight, *choice)?;
                let results = self.engine.get_proposal_results(&org, *id)?;
                Ok(json!({ "total_votes": results.total_votes }))
            }
            Step::RemoveVote { actor, id } => {
                let who = self.actor(actor);
                self.engine.remove_vote(&who, &org, *id)?;
                Ok(Value::Null)
            }
            Step::CleanupVote { actor, id } => {
                let who = self.actor(actor);
                self.engine.cleanup_vote(&who, &org, *id)?;
                Ok(Value::Null)
            }
            Step::Execute { actor, id, payee } => {
                let who = self.actor(actor);
                let payee = payee.as_deref().map(|p| self.actor(p));
                let outcome = self.engine.execute_proposal(&who, &org, *id, payee)?;
                Ok(json!({ "result": outcome }))
            }
            Step::CleanupProposal { actor, id } => {
                let who = self.actor(actor);
                let refund = self.engine.cleanup_proposal(&who, &org, *id)?;
                Ok(json!({ "refund": refund.raw() }))
            }
            Step::Advance { ticks } => {
                self.clock.advance(*ticks);
                Ok(json!({ "tick": self.engine.runtime().now().ticks() }))
            }
        }
    }

    /// Snapshot of the organization after the run.
    pub fn summary(&self) -> Result<Summary, GovernanceError> {
        let org = self.engine.organization(&self.org)?;
        let mut proposals = Vec::new();
        for id in 1..=org.proposal_count {
            match self.engine.get_proposal_results(&self.org, id) {
                Ok(p) => proposals.push(ProposalSummary {
                    id: p.id,
                    name: p.name,
                    proposer: self.name_of(&p.proposer),
                    result: p.result,
                    yes_votes: p.yes_votes,
                    no_votes: p.no_votes,
                    abstain_votes: p.abstain_votes,
                    total_votes: p.total_votes,
                }),
                // cleaned up
                Err(GovernanceError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }

        let mut members = BTreeMap::new();
        for (id, name) in &self.names {
            let member = match self.engine.get_member_state(&self.org, id) {
                Ok(member) => member,
                Err(GovernanceError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            };
            let staked = match self.engine.stake_account(&self.org, id) {
                Ok(stake) => stake.staked.raw(),
                Err(GovernanceError::NotFound(_)) => 0,
                Err(e) => return Err(e),
            };
            members.insert(
                name.clone(),
                MemberSummary {
                    staked,
                    tokens: self.engine.token_balance(&self.org, id)?.raw(),
                    native: self.engine.native_balance(id)?.raw(),
                    reward_points: member.reward_points,
                    total_votes_cast: member.total_votes_cast,
                    proposals_created: member.proposals_created,
                    successful_proposals: member.successful_proposals,
                    reputation_score: member.reputation_score,
                },
            );
        }

        Ok(Summary {
            organization: self.org.to_string(),
            tick: self.engine.runtime().now().ticks(),
            treasury: self.engine.treasury_balance(&self.org)?.raw(),
            token_supply: self.engine.token_supply(&self.org)?.raw(),
            proposals,
            members,
        })
    }
}

/// Replay `scenario`, writing one JSON line per step and a final summary
/// line to `out`. With `fail_fast` the run stops at the first failed step.
pub fn run<W: Write>(
    config: &SimulationConfig,
    scenario: &Scenario,
    fail_fast: bool,
    out: &mut W,
) -> anyhow::Result<RunOutcome> {
    let mut sim = Simulator::new(config)?;
    let mut outcome = RunOutcome::default();

    for (index, step) in scenario.steps.iter().enumerate() {
        let actor = match step {
            Step::Advance { .. } => None,
            Step::Issue { actor }
            | Step::InitStake { actor }
            | Step::Stake { actor, .. }
            | Step::Unstake { actor, .. }
            | Step::CloseStake { actor }
            | Step::CreateProposal { actor, .. }
            | Step::Vote { actor, .. }
            | Step::RemoveVote { actor, .. }
            | Step::CleanupVote { actor, .. }
            | Step::Execute { actor, .. }
            | Step::CleanupProposal { actor, .. } => Some(actor.as_str()),
        };
        let report = match sim.apply(step) {
            Ok(result) => {
                outcome.applied += 1;
                StepReport {
                    step: index + 1,
                    op: step.op(),
                    ok: true,
                    result: (!result.is_null()).then_some(result),
                    error: None,
                    actor,
                }
            }
            Err(e) => {
                outcome.failed += 1;
                warn!(step = index + 1, op = step.op(), error = %e, "step failed");
                StepReport {
                    step: index + 1,
                    op: step.op(),
                    ok: false,
                    result: None,
                    error: Some(e.to_string()),
                    actor,
                }
            }
        };
        serde_json::to_writer(&mut *out, &report)?;
        writeln!(out)?;
        if fail_fast && !report.ok {
            break;
        }
    }

    let summary = sim.summary().context("failed to build summary")?;
    serde_json::to_writer(&mut *out, &json!({ "summary": summary }))?;
    writeln!(out)?;
    info!(
        applied = outcome.applied,
        failed = outcome.failed,
        "simulation finished"
    );
    Ok(outcome)
}
