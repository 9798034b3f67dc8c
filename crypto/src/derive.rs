//! Identity derivation.
//!
//! Every program-owned account is located by a pure function of a namespace
//! tag and its seeds. Each part is length-prefixed before hashing, so
//! `("ab", "c")` and `("a", "bc")` never derive the same identity.

use crate::hash::blake2b_256_multi;
use quorum_types::Identity;

const DOMAIN: &[u8] = b"quorum/derive/v1";
const LABEL_DOMAIN: &[u8] = b"quorum/label/v1";

/// Derive the identity of an account from `namespace` and `seeds`.
pub fn derive_identity(namespace: &[u8], seeds: &[&[u8]]) -> Identity {
    let mut prefixes = Vec::with_capacity(seeds.len() + 1);
    prefixes.push((namespace.len() as u32).to_le_bytes());
    for seed in seeds {
        prefixes.push((seed.len() as u32).to_le_bytes());
    }

    let mut parts: Vec<&[u8]> = Vec::with_capacity(2 * seeds.len() + 3);
    parts.push(DOMAIN);
    parts.push(&prefixes[0]);
    parts.push(namespace);
    for (prefix, seed) in prefixes[1..].iter().zip(seeds) {
        parts.push(prefix);
        parts.push(seed);
    }
    Identity::new(blake2b_256_multi(&parts))
}

/// Check that a caller-supplied identity is the one derived from `namespace` and `seeds`.
pub fn verify_identity(identity: &Identity, namespace: &[u8], seeds: &[&[u8]]) -> bool {
    derive_identity(namespace, seeds) == *identity
}

/// Stable identity for a human-readable label (test actors, CLI scenario actors).
///
/// Lives in a separate hash domain, so a label can never collide with a
/// derived account.
pub fn identity_from_label(label: &str) -> Identity {
    Identity::new(blake2b_256_multi(&[LABEL_DOMAIN, label.as_bytes()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_seeds_same_identity() {
        let a = derive_identity(b"stake", &[b"org", b"alice"]);
        let b = derive_identity(b"stake", &[b"org", b"alice"]);
        assert_eq!(a, b);
    }

    #[test]
    fn namespace_separates_accounts() {
        let stake = derive_identity(b"stake", &[b"org", b"alice"]);
        let member = derive_identity(b"member", &[b"org", b"alice"]);
        assert_ne!(stake, member);
    }

    #[test]
    fn seed_boundaries_matter() {
        let a = derive_identity(b"ns", &[b"ab", b"c"]);
        let b = derive_identity(b"ns", &[b"a", b"bc"]);
        let c = derive_identity(b"nsab", &[b"c"]);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn verify_accepts_only_matching_seeds() {
        let id = derive_identity(b"proposal", &[b"org", &1u64.to_le_bytes()]);
        assert!(verify_identity(&id, b"proposal", &[b"org", &1u64.to_le_bytes()]));
        assert!(!verify_identity(&id, b"proposal", &[b"org", &2u64.to_le_bytes()]));
    }

    #[test]
    fn labels_do_not_collide_with_derived() {
        assert_ne!(identity_from_label("alice"), derive_identity(b"alice", &[]));
        assert_eq!(identity_from_label("alice"), identity_from_label("alice"));
    }

    proptest! {
        #[test]
        fn distinct_seed_pairs_derive_distinct_identities(
            a in any::<u64>(),
            b in any::<u64>(),
        ) {
            prop_assume!(a != b);
            let ia = derive_identity(b"vote", &[&a.to_le_bytes()]);
            let ib = derive_identity(b"vote", &[&b.to_le_bytes()]);
            prop_assert_ne!(ia, ib);
        }
    }
}
