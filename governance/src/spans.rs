//! [`tracing::Span`] constructors for engine operations.
//!
//! Identities are recorded in their short form so traces stay readable.

use quorum_types::Identity;
use tracing::{info_span, Span};

/// Span covering one state-changing operation submitted by `actor`.
pub fn operation_span(op: &'static str, org: &Identity, actor: &Identity) -> Span {
    info_span!("governance_op", op, org = %org.short(), actor = %actor.short())
}

/// Span covering one proposal-scoped operation.
pub fn proposal_span(op: &'static str, org: &Identity, actor: &Identity, proposal_id: u64) -> Span {
    info_span!(
        "governance_op",
        op,
        org = %org.short(),
        actor = %actor.short(),
        proposal_id
    )
}

pub fn view_span(view: &'static str) -> Span {
    info_span!("governance_view", view)
}
