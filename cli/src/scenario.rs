//! Scenario file: an ordered list of `[[step]]` tables, each tagged by `op`.
//!
//! ```toml
//! [[step]]
//! op = "issue"
//! actor = "alice"
//!
//! [[step]]
//! op = "vote"
//! actor = "alice"
//! id = 1
//! weight = 50
//! choice = "yes"
//! ```

use std::path::Path;

use anyhow::Context;
use quorum_governance::VoteChoice;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounty {
    pub payee: String,
    pub amount: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Issue {
        actor: String,
    },
    InitStake {
        actor: String,
    },
    Stake {
        actor: String,
        amount: u64,
    },
    Unstake {
        actor: String,
        amount: u64,
    },
    CloseStake {
        actor: String,
    },
    CreateProposal {
        actor: String,
        id: u64,
        name: String,
        #[serde(default)]
        uri: String,
        threshold: u64,
        expiry_offset: u64,
        /// A bounty proposal when present, a poll otherwise.
        #[serde(default)]
        bounty: Option<Bounty>,
    },
    Vote {
        actor: String,
        id: u64,
        weight: u64,
        choice: VoteChoice,
    },
    RemoveVote {
        actor: String,
        id: u64,
    },
    CleanupVote {
        actor: String,
        id: u64,
    },
    Execute {
        actor: String,
        id: u64,
        #[serde(default)]
        payee: Option<String>,
    },
    CleanupProposal {
        actor: String,
        id: u64,
    },
    Advance {
        ticks: u64,
    },
}

impl Step {
    pub fn op(&self) -> &'static str {
        match self {
            Self::Issue { .. } => "issue",
            Self::InitStake { .. } => "init_stake",
            Self::Stake { .. } => "stake",
            Self::Unstake { .. } => "unstake",
            Self::CloseStake { .. } => "close_stake",
            Self::CreateProposal { .. } => "create_proposal",
            Self::Vote { .. } => "vote",
            Self::RemoveVote { .. } => "remove_vote",
            Self::CleanupVote { .. } => "cleanup_vote",
            Self::Execute { .. } => "execute",
            Self::CleanupProposal { .. } => "cleanup_proposal",
            Self::Advance { .. } => "advance",
        }
    }
}

impl Scenario {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse scenario file {}", path.display()))
    }
}
