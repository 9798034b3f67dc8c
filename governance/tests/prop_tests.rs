use std::collections::BTreeMap;

use proptest::prelude::*;

use quorum_crypto::identity_from_label;
use quorum_governance::{
    GovernanceEngine, GovernanceError, GovernancePolicy, NewProposal, ProposalKind, VoteChoice,
};
use quorum_nullables::{NullClock, NullStore};
use quorum_runtime::{Runtime, RuntimeConfig};
use quorum_types::{Identity, NativeAmount, OrganizationParams, TokenAmount};

const VOTERS: usize = 4;
const STAKE: u64 = 50;

type Engine = GovernanceEngine<NullStore, NullClock>;

fn setup(params: OrganizationParams) -> (Engine, NullClock, Identity) {
    let clock = NullClock::new(1);
    let runtime = Runtime::new(NullStore::new(), clock.clone(), RuntimeConfig::default());
    let engine = GovernanceEngine::new(runtime, GovernancePolicy::default());
    let admin = identity_from_label("admin");
    engine
        .runtime()
        .airdrop(&admin, NativeAmount::new(1_000))
        .unwrap();
    let org = engine.initialize(&admin, 1, params).unwrap();
    (engine, clock, org)
}

fn params() -> OrganizationParams {
    OrganizationParams {
        issue_price: NativeAmount::new(100),
        issue_amount: TokenAmount::new(STAKE),
        proposal_fee: NativeAmount::new(10),
        max_supply: TokenAmount::new(10_000),
        min_quorum: 100,
        max_expiry: 10_000,
    }
}

fn staker(engine: &Engine, org: &Identity, label: &str) -> Identity {
    let who = identity_from_label(label);
    engine
        .runtime()
        .airdrop(&who, NativeAmount::new(10_000))
        .unwrap();
    engine.issue_tokens(&who, org).unwrap();
    engine.init_stake(&who, org).unwrap();
    engine
        .stake_tokens(&who, org, TokenAmount::new(STAKE))
        .unwrap();
    who
}

#[derive(Clone, Debug)]
enum Op {
    Vote {
        voter: usize,
        weight: u64,
        choice: VoteChoice,
    },
    Remove {
        voter: usize,
    },
    Tick,
}

fn choice() -> impl Strategy<Value = VoteChoice> {
    prop_oneof![
        Just(VoteChoice::Yes),
        Just(VoteChoice::No),
        Just(VoteChoice::Abstain),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..VOTERS, 1u64..STAKE + 10, choice())
            .prop_map(|(voter, weight, choice)| Op::Vote { voter, weight, choice }),
        (0..VOTERS).prop_map(|voter| Op::Remove { voter }),
        Just(Op::Tick),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Tallies always equal the sum of live votes, bucket by bucket, and
    /// `total_votes == yes + no + abstain` after every operation.
    #[test]
    fn tallies_track_live_votes(ops in prop::collection::vec(op(), 1..40)) {
        let (engine, clock, org) = setup(params());
        let voters: Vec<Identity> = (0..VOTERS)
            .map(|i| staker(&engine, &org, &format!("voter-{i}")))
            .collect();
        engine
            .create_proposal(&voters[0], &org, NewProposal {
                id: 1,
                name: "tally".into(),
                uri: String::new(),
                kind: ProposalKind::Poll,
                threshold: 1,
                expiry_offset: 10_000,
            })
            .unwrap();

        let mut live: BTreeMap<usize, (u64, VoteChoice)> = BTreeMap::new();
        for op in ops {
            match op {
                Op::Vote { voter, weight, choice } => {
                    let result = engine.vote(&voters[voter], &org, 1, weight, choice);
                    if live.contains_key(&voter) {
                        prop_assert_eq!(result, Err(GovernanceError::AlreadyVoted));
                    } else if weight > STAKE {
                        let is_stake_error = matches!(result, Err(GovernanceError::InsufficientStake { .. }));
                        prop_assert!(is_stake_error);
                    } else {
                        prop_assert!(result.is_ok());
                        live.insert(voter, (weight, choice));
                    }
                }
                Op::Remove { voter } => {
                    if engine.remove_vote(&voters[voter], &org, 1).is_ok() {
                        prop_assert!(live.remove(&voter).is_some());
                    }
                }
                Op::Tick => clock.advance(1),
            }

            let results = engine.get_proposal_results(&org, 1).unwrap();
            let bucket = |c: VoteChoice| -> u64 {
                live.values().filter(|(_, v)| *v == c).map(|(w, _)| w).sum()
            };
            prop_assert_eq!(results.yes_votes, bucket(VoteChoice::Yes));
            prop_assert_eq!(results.no_votes, bucket(VoteChoice::No));
            prop_assert_eq!(results.abstain_votes, bucket(VoteChoice::Abstain));
            prop_assert_eq!(
                results.total_votes,
                results.yes_votes + results.no_votes + results.abstain_votes
            );
        }

        for (i, voter) in voters.iter().enumerate() {
            let open = engine.stake_account(&org, voter).unwrap().open_votes;
            prop_assert_eq!(open, u64::from(live.contains_key(&i)));
        }
    }

    /// Total issued tokens never exceed `max_supply`, however many issues
    /// are attempted.
    #[test]
    fn issuance_is_capped(
        issue_amount in 1u64..100,
        headroom in 0u64..500,
        attempts in 0usize..20,
    ) {
        let max_supply = issue_amount + headroom;
        let (engine, _clock, org) = setup(OrganizationParams {
            issue_amount: TokenAmount::new(issue_amount),
            max_supply: TokenAmount::new(max_supply),
            ..params()
        });
        let buyer = identity_from_label("buyer");
        engine
            .runtime()
            .airdrop(&buyer, NativeAmount::new(1_000_000))
            .unwrap();

        let mut issued = 0u64;
        for _ in 0..attempts {
            match engine.issue_tokens(&buyer, &org) {
                Ok(amount) => issued += amount.raw(),
                Err(e) => {
                    let is_cap = matches!(e, GovernanceError::SupplyExceeded { .. });
                    prop_assert!(is_cap);
                }
            }
            let supply = engine.token_supply(&org).unwrap().raw();
            prop_assert!(supply <= max_supply);
            prop_assert_eq!(supply, issued);
        }
        prop_assert_eq!(engine.token_balance(&org, &buyer).unwrap().raw(), issued);
    }

    /// Tokens are conserved between the owner's wallet and their vault.
    #[test]
    fn stake_and_unstake_conserve_tokens(
        steps in prop::collection::vec((any::<bool>(), 1u64..30), 1..20),
    ) {
        let (engine, clock, org) = setup(params());
        let owner = identity_from_label("owner");
        engine
            .runtime()
            .airdrop(&owner, NativeAmount::new(10_000))
            .unwrap();
        engine.issue_tokens(&owner, &org).unwrap();
        engine.init_stake(&owner, &org).unwrap();

        for (stake, amount) in steps {
            clock.advance(1);
            let amount = TokenAmount::new(amount);
            let _ = if stake {
                engine.stake_tokens(&owner, &org, amount)
            } else {
                engine.unstake_tokens(&owner, &org, amount)
            };
            let wallet = engine.token_balance(&org, &owner).unwrap().raw();
            let staked = engine.stake_account(&org, &owner).unwrap().staked.raw();
            prop_assert_eq!(wallet + staked, STAKE);
        }
    }
}
