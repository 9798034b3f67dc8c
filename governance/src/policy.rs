//! Engine-wide policy knobs.
//!
//! Two rules are policy rather than structure: when a proposal may be
//! executed, and how much a successful proposer is rewarded.

use serde::{Deserialize, Serialize};

/// When `execute_proposal` may settle a proposal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionGate {
    /// Succeed as soon as quorum and threshold are met; fail only once the
    /// voting window has elapsed.
    #[default]
    QuorumOrExpiry,
    /// Settle only after the voting window has elapsed, whatever the tally.
    ExpiryOnly,
}

/// Reward points credited to the proposer of a successful proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "curve", rename_all = "kebab-case")]
pub enum RewardCurve {
    Flat { points: u64 },
    /// `base + total_votes * bps_of_votes / 10_000`.
    Proportional { base: u64, bps_of_votes: u32 },
}

impl RewardCurve {
    /// Points for a proposal that succeeded with `total_votes` weight cast.
    pub fn points(&self, total_votes: u64) -> Option<u64> {
        match *self {
            Self::Flat { points } => Some(points),
            Self::Proportional { base, bps_of_votes } => {
                let bonus = u128::from(total_votes) * u128::from(bps_of_votes) / 10_000;
                base.checked_add(u64::try_from(bonus).ok()?)
            }
        }
    }
}

impl Default for RewardCurve {
    fn default() -> Self {
        Self::Flat { points: 100 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernancePolicy {
    pub execution: ExecutionGate,
    pub reward: RewardCurve,
    /// Minimum ticks between casting a vote and removing it.
    pub vote_cooldown: u64,
    pub max_name_len: usize,
    pub max_uri_len: usize,
}

impl Default for GovernancePolicy {
    fn default() -> Self {
        Self {
            execution: ExecutionGate::default(),
            reward: RewardCurve::default(),
            vote_cooldown: 1,
            max_name_len: 32,
            max_uri_len: 72,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_curve_ignores_engagement() {
        let curve = RewardCurve::Flat { points: 7 };
        assert_eq!(curve.points(0), Some(7));
        assert_eq!(curve.points(1_000), Some(7));
    }

    #[test]
    fn proportional_curve_scales_with_votes() {
        let curve = RewardCurve::Proportional {
            base: 10,
            bps_of_votes: 5_000,
        };
        assert_eq!(curve.points(100), Some(60));
        assert_eq!(curve.points(1), Some(10));
    }

    #[test]
    fn proportional_curve_overflow_is_none() {
        let curve = RewardCurve::Proportional {
            base: u64::MAX,
            bps_of_votes: 10_000,
        };
        assert_eq!(curve.points(1), None);
    }

    #[test]
    fn policy_parses_from_toml() {
        let policy: GovernancePolicy = toml::from_str(
            r#"
            execution = "expiry-only"
            vote_cooldown = 3

            [reward]
            curve = "proportional"
            base = 5
            bps_of_votes = 100
            "#,
        )
        .unwrap();
        assert_eq!(policy.execution, ExecutionGate::ExpiryOnly);
        assert_eq!(policy.vote_cooldown, 3);
        assert_eq!(
            policy.reward,
            RewardCurve::Proportional {
                base: 5,
                bps_of_votes: 100
            }
        );
        assert_eq!(policy.max_name_len, 32);
    }
}
