use quorum_runtime::AccountData;
use quorum_types::{Identity, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteChoice {
    Yes,
    No,
    Abstain,
}

/// One voter's weighted choice on one proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub voter: Identity,
    pub proposal: Identity,
    pub proposal_id: u64,
    pub weight: u64,
    pub choice: VoteChoice,
    pub cast_at: Timestamp,
}

impl AccountData for Vote {
    const KIND: &'static str = "vote";
}
