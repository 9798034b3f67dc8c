//! Organization bootstrap and token issuance.

use quorum_runtime::{NativeLedger, TokenLedger, Transaction};
use quorum_types::{Identity, OrganizationParams, TokenAmount};

use crate::error::GovernanceError;
use crate::seeds;
use crate::state::{Organization, Treasury};

/// Create the organization, its treasury and its governance mint.
///
/// The signer becomes the initializer and pays every storage deposit. The
/// mint authority is a program identity derived from the organization, so
/// no external key can mint outside `issue_tokens`.
pub fn initialize(
    tx: &mut Transaction<'_>,
    seed: u64,
    params: OrganizationParams,
) -> Result<Identity, GovernanceError> {
    params.validate()?;
    let org_id = seeds::organization(seed);
    if tx.exists(&org_id)? {
        return Err(GovernanceError::AlreadyInitialized(org_id));
    }
    let initializer = *tx.signer();
    let org = Organization {
        seed,
        initializer,
        authority: seeds::authority(&org_id),
        mint: seeds::mint(&org_id),
        treasury: seeds::treasury(&org_id),
        params,
        proposal_count: 0,
    };
    let treasury = Treasury {
        organization: org_id,
        authority: org.authority,
    };
    tx.create_account(&org_id, &initializer, &org)?;
    tx.create_account(&org.treasury, &initializer, &treasury)?;
    tx.create_mint(&org.mint, &org.authority, &initializer)?;
    Ok(org_id)
}

/// Sell one batch of `issue_amount` tokens to the signer for `issue_price`
/// native units, paid into the treasury.
pub fn issue_tokens(
    tx: &mut Transaction<'_>,
    org_id: &Identity,
) -> Result<TokenAmount, GovernanceError> {
    let org = load_organization(tx, org_id)?;
    let buyer = *tx.signer();
    let amount = org.params.issue_amount;

    let supply = tx.token_supply(&org.mint)?;
    match supply.checked_add(amount) {
        Some(total) if total <= org.params.max_supply => {}
        _ => {
            return Err(GovernanceError::SupplyExceeded {
                requested: amount.raw(),
                supply: supply.raw(),
                max_supply: org.params.max_supply.raw(),
            })
        }
    }

    tx.transfer_native(&buyer, &org.treasury, org.params.issue_price)?;
    tx.mint_to(&org.authority, &org.mint, &buyer, amount)?;
    Ok(amount)
}

/// Load an organization and check that it lives at the identity its seed
/// derives to.
pub(crate) fn load_organization(
    tx: &Transaction<'_>,
    org_id: &Identity,
) -> Result<Organization, GovernanceError> {
    let org: Organization = tx.load(org_id)?;
    if !seeds::is_organization(org_id, org.seed) {
        return Err(GovernanceError::InvalidAccount(*org_id));
    }
    Ok(org)
}
