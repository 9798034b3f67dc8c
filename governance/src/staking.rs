//! Locking governance tokens into a per-owner vault.
//!
//! Stake is the only source of voting weight. The vault is a token account
//! held by a program identity; tokens leave it only through
//! `unstake_tokens`.

use quorum_runtime::{TokenLedger, Transaction};
use quorum_types::{Identity, TokenAmount};

use crate::error::GovernanceError;
use crate::seeds;
use crate::setup::load_organization;
use crate::state::{Member, StakeAccount};

pub fn init_stake(tx: &mut Transaction<'_>, org_id: &Identity) -> Result<Identity, GovernanceError> {
    let org = load_organization(tx, org_id)?;
    let owner = *tx.signer();
    let stake_id = seeds::stake(org_id, &owner);
    let vault = seeds::vault(org_id, &owner);
    let stake = StakeAccount::new(owner, *org_id, vault, tx.now());
    tx.create_account(&stake_id, &owner, &stake)?;
    tx.open_token_account(&org.mint, &vault, &owner)?;
    Ok(stake_id)
}

/// Move `amount` tokens from the signer into their vault. Creates the
/// member record on first stake.
pub fn stake_tokens(
    tx: &mut Transaction<'_>,
    org_id: &Identity,
    amount: TokenAmount,
) -> Result<TokenAmount, GovernanceError> {
    if amount.is_zero() {
        return Err(GovernanceError::ZeroAmount);
    }
    let org = load_organization(tx, org_id)?;
    let (stake_id, mut stake) = load_own_stake(tx, org_id)?;
    let owner = stake.owner;

    stake.deposit(amount, tx.now())?;
    tx.transfer_tokens(&org.mint, &owner, &stake.vault, amount)?;
    tx.save(&stake_id, &stake)?;

    let member_id = seeds::member(org_id, &owner);
    if !tx.exists(&member_id)? {
        let member = Member::new(owner, *org_id, tx.now());
        tx.create_account(&member_id, &owner, &member)?;
    }
    Ok(stake.staked)
}

/// Move `amount` tokens from the vault back to the owner. Refused while any
/// vote backed by this stake is still open.
pub fn unstake_tokens(
    tx: &mut Transaction<'_>,
    org_id: &Identity,
    amount: TokenAmount,
) -> Result<TokenAmount, GovernanceError> {
    if amount.is_zero() {
        return Err(GovernanceError::ZeroAmount);
    }
    let org = load_organization(tx, org_id)?;
    let (stake_id, mut stake) = load_own_stake(tx, org_id)?;

    stake.withdraw(amount, tx.now())?;
    tx.transfer_tokens(&org.mint, &stake.vault, &stake.owner, amount)?;
    tx.save(&stake_id, &stake)?;
    Ok(stake.staked)
}

/// Close an empty stake account and its vault, refunding both deposits.
pub fn close_stake_account(tx: &mut Transaction<'_>, org_id: &Identity) -> Result<(), GovernanceError> {
    let org = load_organization(tx, org_id)?;
    let (stake_id, stake) = load_own_stake(tx, org_id)?;
    if !stake.staked.is_zero() {
        return Err(GovernanceError::NonZeroStake(stake.staked.raw()));
    }
    if stake.open_votes > 0 {
        return Err(GovernanceError::VotesOutstanding(stake.open_votes));
    }
    tx.close_token_account(&org.mint, &stake.vault, &stake.owner)?;
    tx.close_account(&stake_id, &stake.owner)?;
    Ok(())
}

fn load_own_stake(
    tx: &Transaction<'_>,
    org_id: &Identity,
) -> Result<(Identity, StakeAccount), GovernanceError> {
    let stake_id = seeds::stake(org_id, tx.signer());
    let stake: StakeAccount = tx.load(&stake_id)?;
    tx.require_signer(&stake.owner)?;
    Ok((stake_id, stake))
}
