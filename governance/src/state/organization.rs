use quorum_runtime::AccountData;
use quorum_types::{Identity, OrganizationParams};
use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;

/// Root account of one governed community.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub seed: u64,
    pub initializer: Identity,
    /// Program identity that signs for the mint and the treasury.
    pub authority: Identity,
    pub mint: Identity,
    pub treasury: Identity,
    pub params: OrganizationParams,
    /// Number of proposals created so far; the next id is `proposal_count + 1`.
    pub proposal_count: u64,
}

impl Organization {
    pub fn next_proposal_id(&self) -> u64 {
        self.proposal_count + 1
    }

    pub fn check_expiry_offset(&self, offset: u64) -> Result<(), GovernanceError> {
        if offset > self.params.max_expiry {
            return Err(GovernanceError::ExpiryTooFar {
                requested: offset,
                max: self.params.max_expiry,
            });
        }
        Ok(())
    }

    pub fn record_proposal(&mut self) -> Result<u64, GovernanceError> {
        self.proposal_count = self
            .proposal_count
            .checked_add(1)
            .ok_or(GovernanceError::Overflow)?;
        Ok(self.proposal_count)
    }
}

impl AccountData for Organization {
    const KIND: &'static str = "organization";
}

/// Marker record for the treasury. The balance itself lives in the native
/// ledger under the treasury identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasury {
    pub organization: Identity,
    pub authority: Identity,
}

impl AccountData for Treasury {
    const KIND: &'static str = "treasury";
}
