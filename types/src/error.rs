//! Parameter validation errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("issue amount must be non-zero")]
    ZeroIssueAmount,

    #[error("max supply {max_supply} is below a single issue of {issue_amount}")]
    SupplyBelowIssue { max_supply: u64, issue_amount: u64 },

    #[error("maximum proposal expiry must be non-zero")]
    ZeroMaxExpiry,
}
