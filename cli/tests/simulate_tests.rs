use std::io::Write;

use quorum_cli::{run, Scenario, SimulationConfig};
use serde_json::Value;
use tempfile::NamedTempFile;

const CONFIG: &str = r#"
start_tick = 1

[runtime]
storage_deposit = 10

[organization]
seed = 3
initializer = "admin"
issue_price = 100
issue_amount = 50
proposal_fee = 20
max_supply = 1000
min_quorum = 100
max_expiry = 500

[[accounts]]
name = "admin"
native = 1000

[[accounts]]
name = "alice"
native = 1000

[[accounts]]
name = "bob"
native = 1000
"#;

const SCENARIO: &str = r#"
[[step]]
op = "issue"
actor = "alice"

[[step]]
op = "issue"
actor = "bob"

[[step]]
op = "init_stake"
actor = "alice"

[[step]]
op = "init_stake"
actor = "bob"

[[step]]
op = "stake"
actor = "alice"
amount = 50

[[step]]
op = "stake"
actor = "bob"
amount = 50

[[step]]
op = "create_proposal"
actor = "alice"
id = 1
name = "pay carol"
threshold = 10
expiry_offset = 50
bounty = { payee = "carol", amount = 150 }

[[step]]
op = "vote"
actor = "alice"
id = 1
weight = 50
choice = "yes"

[[step]]
op = "vote"
actor = "alice"
id = 1
weight = 50
choice = "yes"

[[step]]
op = "vote"
actor = "bob"
id = 1
weight = 50
choice = "yes"

[[step]]
op = "execute"
actor = "bob"
id = 1
payee = "carol"
"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn lines(output: &[u8]) -> Vec<Value> {
    String::from_utf8(output.to_vec())
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn loads_config_and_scenario_from_disk() {
    let config_file = write_temp(CONFIG);
    let scenario_file = write_temp(SCENARIO);
    let config = SimulationConfig::load(config_file.path()).unwrap();
    let scenario = Scenario::load(scenario_file.path()).unwrap();
    assert_eq!(config.accounts.len(), 3);
    assert_eq!(scenario.steps.len(), 11);
}

#[test]
fn missing_config_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = SimulationConfig::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("absent.toml"));
}

#[test]
fn replay_reports_each_step_and_summary() {
    let config: SimulationConfig = toml::from_str(CONFIG).unwrap();
    let scenario: Scenario = toml::from_str(SCENARIO).unwrap();
    let mut out = Vec::new();

    let outcome = run(&config, &scenario, false, &mut out).unwrap();
    assert_eq!(outcome.applied, 10);
    assert_eq!(outcome.failed, 1);

    let lines = lines(&out);
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[8]["ok"], Value::Bool(false));
    assert_eq!(lines[8]["op"], "vote");
    assert!(lines[8]["error"]
        .as_str()
        .unwrap()
        .contains("already voted"));
    assert_eq!(lines[10]["result"]["result"], "succeeded");

    let summary = &lines[11]["summary"];
    // two issues plus the proposal fee, minus the bounty
    assert_eq!(summary["treasury"], 100 + 100 + 20 - 150);
    assert_eq!(summary["token_supply"], 100);
    assert_eq!(summary["proposals"][0]["result"], "succeeded");
    assert_eq!(summary["proposals"][0]["proposer"], "alice");
    assert_eq!(summary["members"]["alice"]["reward_points"], 100);
    assert_eq!(summary["members"]["alice"]["successful_proposals"], 1);
    assert_eq!(summary["members"]["bob"]["reward_points"], 0);
}

#[test]
fn fail_fast_stops_at_first_failure() {
    let config: SimulationConfig = toml::from_str(CONFIG).unwrap();
    let scenario: Scenario = toml::from_str(SCENARIO).unwrap();
    let mut out = Vec::new();

    let outcome = run(&config, &scenario, true, &mut out).unwrap();
    assert_eq!(outcome.applied, 8);
    assert_eq!(outcome.failed, 1);
    let lines = lines(&out);
    // nine step lines and the summary
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[9]["summary"]["proposals"][0]["result"], "pending");
}
