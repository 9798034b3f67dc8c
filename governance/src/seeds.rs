//! Derived identities of every governance account.
//!
//! Nothing is looked up through a registry: each account lives at an
//! identity computed from stable seeds, so "at most one per key" falls out of
//! account creation failing on an occupied identity.

use quorum_crypto::{derive_identity, verify_identity};
use quorum_types::Identity;

pub const ORGANIZATION: &[u8] = b"organization";
pub const AUTHORITY: &[u8] = b"authority";
pub const MINT: &[u8] = b"mint";
pub const TREASURY: &[u8] = b"treasury";
pub const STAKE: &[u8] = b"stake";
pub const VAULT: &[u8] = b"vault";
pub const MEMBER: &[u8] = b"member";
pub const PROPOSAL: &[u8] = b"proposal";
pub const VOTE: &[u8] = b"vote";

pub fn organization(seed: u64) -> Identity {
    derive_identity(ORGANIZATION, &[&seed.to_le_bytes()])
}

pub fn is_organization(id: &Identity, seed: u64) -> bool {
    verify_identity(id, ORGANIZATION, &[&seed.to_le_bytes()])
}

/// Program-controlled identity that signs for the mint and the treasury.
pub fn authority(org: &Identity) -> Identity {
    derive_identity(AUTHORITY, &[org.as_bytes()])
}

pub fn mint(org: &Identity) -> Identity {
    derive_identity(MINT, &[org.as_bytes()])
}

pub fn treasury(org: &Identity) -> Identity {
    derive_identity(TREASURY, &[org.as_bytes()])
}

pub fn stake(org: &Identity, owner: &Identity) -> Identity {
    derive_identity(STAKE, &[org.as_bytes(), owner.as_bytes()])
}

pub fn vault(org: &Identity, owner: &Identity) -> Identity {
    derive_identity(VAULT, &[org.as_bytes(), owner.as_bytes()])
}

pub fn member(org: &Identity, owner: &Identity) -> Identity {
    derive_identity(MEMBER, &[org.as_bytes(), owner.as_bytes()])
}

pub fn proposal(org: &Identity, id: u64) -> Identity {
    derive_identity(PROPOSAL, &[org.as_bytes(), &id.to_le_bytes()])
}

pub fn vote(proposal: &Identity, voter: &Identity) -> Identity {
    derive_identity(VOTE, &[proposal.as_bytes(), voter.as_bytes()])
}
