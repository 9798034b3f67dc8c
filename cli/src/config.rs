//! Simulation config file.
//!
//! ```toml
//! start_tick = 1
//!
//! [runtime]
//! storage_deposit = 10
//!
//! [policy]
//! execution = "quorum-or-expiry"
//!
//! [organization]
//! seed = 1
//! initializer = "admin"
//! min_quorum = 100
//!
//! [[accounts]]
//! name = "admin"
//! native = 1000000
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Context};
use quorum_governance::GovernancePolicy;
use quorum_runtime::RuntimeConfig;
use quorum_types::OrganizationParams;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Clock value before the first step.
    pub start_tick: u64,
    pub runtime: RuntimeConfig,
    pub policy: GovernancePolicy,
    pub organization: OrganizationConfig,
    pub accounts: Vec<AccountConfig>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationConfig {
    #[serde(default)]
    pub seed: u64,
    /// Actor name of the initializer; must be one of `accounts`.
    pub initializer: String,
    #[serde(flatten)]
    pub params: OrganizationParams,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    pub name: String,
    /// Native units airdropped before the first step.
    #[serde(default)]
    pub native: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_tick: 1,
            runtime: RuntimeConfig::default(),
            policy: GovernancePolicy::default(),
            organization: OrganizationConfig {
                seed: 0,
                initializer: "admin".into(),
                params: OrganizationParams::default(),
            },
            accounts: Vec::new(),
        }
    }
}

impl SimulationConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.organization
            .params
            .validate()
            .context("invalid organization parameters")?;

        let mut names = BTreeSet::new();
        for account in &self.accounts {
            if account.name.is_empty() {
                bail!("account names must be non-empty");
            }
            if !names.insert(account.name.as_str()) {
                bail!("duplicate account {:?}", account.name);
            }
        }
        if !names.contains(self.organization.initializer.as_str()) {
            bail!(
                "initializer {:?} is not listed under [[accounts]]",
                self.organization.initializer
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quorum_governance::ExecutionGate;

    const SAMPLE: &str = r#"
        start_tick = 5

        [runtime]
        storage_deposit = 3

        [policy]
        execution = "expiry-only"

        [organization]
        seed = 9
        initializer = "admin"
        min_quorum = 40
        issue_price = 10

        [[accounts]]
        name = "admin"
        native = 500

        [[accounts]]
        name = "alice"
    "#;

    #[test]
    fn parses_sample() {
        let config: SimulationConfig = toml::from_str(SAMPLE).unwrap();
        config.validate().unwrap();
        assert_eq!(config.start_tick, 5);
        assert_eq!(config.runtime.storage_deposit.raw(), 3);
        assert_eq!(config.policy.execution, ExecutionGate::ExpiryOnly);
        assert_eq!(config.organization.seed, 9);
        assert_eq!(config.organization.params.min_quorum, 40);
        assert_eq!(config.organization.params.issue_price.raw(), 10);
        // unspecified params keep their defaults
        assert_eq!(
            config.organization.params.max_expiry,
            OrganizationParams::default().max_expiry
        );
        assert_eq!(config.accounts[1].native, 0);
    }

    #[test]
    fn initializer_must_be_an_account() {
        let mut config: SimulationConfig = toml::from_str(SAMPLE).unwrap();
        config.organization.initializer = "mallory".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn duplicate_accounts_rejected() {
        let mut config: SimulationConfig = toml::from_str(SAMPLE).unwrap();
        config.accounts.push(AccountConfig {
            name: "alice".into(),
            native: 1,
        });
        assert!(config.validate().is_err());
    }
}
