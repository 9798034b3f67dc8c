//! Organization parameters, fixed when the organization is initialized.

use crate::amount::{NativeAmount, TokenAmount};
use crate::error::ParamsError;
use serde::{Deserialize, Serialize};

/// Global policy of one organization.
///
/// Weights (`min_quorum`) are measured in token units, the same units a voter
/// commits from their stake. Expiry windows are measured in clock ticks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationParams {
    /// Native price paid into the treasury per `issue_tokens` call.
    pub issue_price: NativeAmount,
    /// Tokens minted to the caller per `issue_tokens` call.
    pub issue_amount: TokenAmount,
    /// Native fee paid into the treasury per proposal.
    pub proposal_fee: NativeAmount,
    /// Hard cap on total tokens ever issued.
    pub max_supply: TokenAmount,
    /// Organization-wide floor on total vote weight for a proposal to pass.
    pub min_quorum: u64,
    /// Longest voting window a proposal may request, in ticks.
    pub max_expiry: u64,
}

impl OrganizationParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.issue_amount.is_zero() {
            return Err(ParamsError::ZeroIssueAmount);
        }
        if self.max_supply < self.issue_amount {
            return Err(ParamsError::SupplyBelowIssue {
                max_supply: self.max_supply.raw(),
                issue_amount: self.issue_amount.raw(),
            });
        }
        if self.max_expiry == 0 {
            return Err(ParamsError::ZeroMaxExpiry);
        }
        Ok(())
    }
}

impl Default for OrganizationParams {
    fn default() -> Self {
        Self {
            issue_price: NativeAmount::new(1_000_000_000),
            issue_amount: TokenAmount::new(100),
            proposal_fee: NativeAmount::new(100_000_000),
            max_supply: TokenAmount::new(1_000_000),
            min_quorum: 100,
            max_expiry: 100_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(OrganizationParams::default().validate().is_ok());
    }

    #[test]
    fn zero_issue_amount_rejected() {
        let params = OrganizationParams {
            issue_amount: TokenAmount::ZERO,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ParamsError::ZeroIssueAmount));
    }

    #[test]
    fn supply_below_issue_rejected() {
        let params = OrganizationParams {
            issue_amount: TokenAmount::new(10),
            max_supply: TokenAmount::new(9),
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::SupplyBelowIssue { max_supply: 9, issue_amount: 10 })
        ));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let params: OrganizationParams = toml::from_str("min_quorum = 7").unwrap();
        assert_eq!(params.min_quorum, 7);
        assert_eq!(params.max_expiry, OrganizationParams::default().max_expiry);
    }
}
