//! Runtime behavior: apply-or-discard, deposits, ledgers.

use quorum_nullables::{NullClock, NullStore};
use quorum_runtime::{
    AccountData, NativeLedger, Runtime, RuntimeConfig, RuntimeError, TokenLedger,
};
use quorum_store::AccountStore;
use quorum_types::{Identity, NativeAmount, TokenAmount};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Counter {
    value: u64,
}

impl AccountData for Counter {
    const KIND: &'static str = "counter";
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Other {
    value: u64,
}

impl AccountData for Other {
    const KIND: &'static str = "other";
}

fn runtime() -> Runtime<NullStore, NullClock> {
    Runtime::new(
        NullStore::new(),
        NullClock::new(1),
        RuntimeConfig {
            storage_deposit: NativeAmount::new(10),
        },
    )
}

fn id(n: u8) -> Identity {
    Identity::new([n; 32])
}

fn native(rt: &Runtime<NullStore, NullClock>, who: &Identity) -> u64 {
    rt.view(|tx| tx.native_balance(who)).unwrap().raw()
}

#[test]
fn create_charges_deposit_and_close_refunds_it() {
    let rt = runtime();
    let alice = id(1);
    let bob = id(2);
    rt.airdrop(&alice, NativeAmount::new(100)).unwrap();

    rt.execute(&alice, |tx| tx.create_account(&id(9), &alice, &Counter { value: 1 }))
        .unwrap();
    assert_eq!(native(&rt, &alice), 90);

    let refunded = rt
        .execute(&alice, |tx| tx.close_account(&id(9), &bob))
        .unwrap();
    assert_eq!(refunded, NativeAmount::new(10));
    assert_eq!(native(&rt, &bob), 10);
    assert!(!rt.store().exists(&id(9)).unwrap());
}

#[test]
fn failed_operation_discards_every_staged_write() {
    let rt = runtime();
    let alice = id(1);
    rt.airdrop(&alice, NativeAmount::new(100)).unwrap();

    let result: Result<(), RuntimeError> = rt.execute(&alice, |tx| {
        tx.create_account(&id(9), &alice, &Counter { value: 1 })?;
        tx.transfer_native(&alice, &id(2), NativeAmount::new(50))?;
        Err(RuntimeError::Overflow)
    });

    assert_eq!(result, Err(RuntimeError::Overflow));
    assert_eq!(native(&rt, &alice), 100);
    assert_eq!(native(&rt, &id(2)), 0);
    assert!(!rt.store().exists(&id(9)).unwrap());
}

#[test]
fn store_failure_at_commit_applies_nothing() {
    let rt = runtime();
    let alice = id(1);
    rt.airdrop(&alice, NativeAmount::new(100)).unwrap();
    rt.store().fail_next_commit();

    let result = rt.execute(&alice, |tx| {
        tx.transfer_native(&alice, &id(2), NativeAmount::new(30))
    });

    assert!(matches!(result, Err(RuntimeError::Store(_))));
    assert_eq!(native(&rt, &alice), 100);
}

#[test]
fn occupied_identity_cannot_be_created_twice() {
    let rt = runtime();
    let alice = id(1);
    rt.airdrop(&alice, NativeAmount::new(100)).unwrap();

    rt.execute(&alice, |tx| tx.create_account(&id(9), &alice, &Counter { value: 1 }))
        .unwrap();
    let again = rt.execute(&alice, |tx| {
        tx.create_account(&id(9), &alice, &Counter { value: 2 })
    });
    assert_eq!(again, Err(RuntimeError::AlreadyExists(id(9))));
}

#[test]
fn loading_under_the_wrong_kind_fails() {
    let rt = runtime();
    let alice = id(1);
    rt.airdrop(&alice, NativeAmount::new(100)).unwrap();
    rt.execute(&alice, |tx| tx.create_account(&id(9), &alice, &Counter { value: 1 }))
        .unwrap();

    let result = rt.view(|tx| tx.load::<Other>(&id(9)));
    assert!(matches!(result, Err(RuntimeError::WrongKind { expected: "other", .. })));
}

#[test]
fn save_keeps_the_deposit_and_reads_see_staged_state() {
    let rt = runtime();
    let alice = id(1);
    rt.airdrop(&alice, NativeAmount::new(100)).unwrap();

    rt.execute(&alice, |tx| {
        tx.create_account(&id(9), &alice, &Counter { value: 1 })?;
        tx.save(&id(9), &Counter { value: 2 })?;
        assert_eq!(tx.load::<Counter>(&id(9))?.value, 2);
        Ok::<_, RuntimeError>(())
    })
    .unwrap();

    let refunded = rt.execute(&alice, |tx| tx.close_account(&id(9), &alice)).unwrap();
    assert_eq!(refunded, NativeAmount::new(10));
    assert_eq!(native(&rt, &alice), 100);
}

#[test]
fn insufficient_native_funds_reported_with_amounts() {
    let rt = runtime();
    let alice = id(1);
    rt.airdrop(&alice, NativeAmount::new(5)).unwrap();

    let result = rt.execute(&alice, |tx| {
        tx.transfer_native(&alice, &id(2), NativeAmount::new(6))
    });
    assert_eq!(
        result,
        Err(RuntimeError::InsufficientFunds {
            needed: 6,
            available: 5
        })
    );
}

#[test]
fn require_signer_rejects_other_identities() {
    let rt = runtime();
    let result = rt.execute(&id(1), |tx| tx.require_signer(&id(2)));
    assert_eq!(result, Err(RuntimeError::Unauthorized(id(1))));
    rt.execute(&id(1), |tx| tx.require_signer(&id(1))).unwrap();
}

#[test]
fn only_the_mint_authority_can_mint() {
    let rt = runtime();
    let payer = id(1);
    let mint = id(7);
    let authority = id(8);
    rt.airdrop(&payer, NativeAmount::new(100)).unwrap();
    rt.execute(&payer, |tx| tx.create_mint(&mint, &authority, &payer))
        .unwrap();

    let forged = rt.execute(&payer, |tx| {
        tx.mint_to(&payer, &mint, &payer, TokenAmount::new(5))
    });
    assert_eq!(forged, Err(RuntimeError::Unauthorized(payer)));

    rt.execute(&payer, |tx| {
        tx.mint_to(&authority, &mint, &payer, TokenAmount::new(5))
    })
    .unwrap();
    let (supply, balance) = rt
        .view(|tx| Ok::<_, RuntimeError>((tx.token_supply(&mint)?, tx.token_balance(&mint, &payer)?)))
        .unwrap();
    assert_eq!(supply, TokenAmount::new(5));
    assert_eq!(balance, TokenAmount::new(5));
}

#[test]
fn token_account_closes_only_when_empty() {
    let rt = runtime();
    let payer = id(1);
    let mint = id(7);
    let authority = id(8);
    let vault = id(9);
    rt.airdrop(&payer, NativeAmount::new(100)).unwrap();
    rt.execute(&payer, |tx| {
        tx.create_mint(&mint, &authority, &payer)?;
        tx.open_token_account(&mint, &vault, &payer)?;
        tx.mint_to(&authority, &mint, &payer, TokenAmount::new(3))?;
        tx.transfer_tokens(&mint, &payer, &vault, TokenAmount::new(1))
    })
    .unwrap();

    let busy = rt.execute(&payer, |tx| tx.close_token_account(&mint, &vault, &payer));
    assert!(matches!(busy, Err(RuntimeError::NonZeroBalance(_))));

    rt.execute(&payer, |tx| {
        tx.transfer_tokens(&mint, &vault, &payer, TokenAmount::new(1))?;
        tx.close_token_account(&mint, &vault, &payer)
    })
    .unwrap();
    // mint deposit and vault deposit paid, vault deposit refunded
    assert_eq!(native(&rt, &payer), 90);
}
