//! Amount types for the native currency and the governance token.
//!
//! Both are raw `u64` units. Only checked arithmetic is exposed: every caller
//! has to decide what an overflow or underflow means for its operation.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! amount_type {
    ($(#[$meta:meta])* $name:ident, $unit:literal) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const ZERO: Self = Self(0);

            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn raw(&self) -> u64 {
                self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0 == 0
            }

            pub fn checked_add(self, other: Self) -> Option<Self> {
                self.0.checked_add(other.0).map(Self)
            }

            pub fn checked_sub(self, other: Self) -> Option<Self> {
                self.0.checked_sub(other.0).map(Self)
            }

            pub fn saturating_sub(self, other: Self) -> Self {
                Self(self.0.saturating_sub(other.0))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", self.0, $unit)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

amount_type!(
    /// Native currency: pays issue prices, proposal fees, storage deposits and
    /// treasury disbursements.
    NativeAmount,
    "native"
);

amount_type!(
    /// Governance token: minted by the organization, staked for voting weight.
    TokenAmount,
    "tokens"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_sub_underflow_is_none() {
        assert_eq!(TokenAmount::new(3).checked_sub(TokenAmount::new(4)), None);
        assert_eq!(
            TokenAmount::new(4).checked_sub(TokenAmount::new(3)),
            Some(TokenAmount::new(1))
        );
    }

    #[test]
    fn checked_add_overflow_is_none() {
        assert_eq!(NativeAmount::new(u64::MAX).checked_add(NativeAmount::new(1)), None);
    }

    #[test]
    fn display_names_the_unit() {
        assert_eq!(NativeAmount::new(5).to_string(), "5 native");
        assert_eq!(TokenAmount::new(7).to_string(), "7 tokens");
    }
}
