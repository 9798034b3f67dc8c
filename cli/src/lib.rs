//! Scenario simulator for the Quorum governance engine.
//!
//! A TOML config describes the organization and the funded actors; a TOML
//! scenario lists the steps to replay. The engine runs on the in-memory
//! store and the manual clock, so a replay is fully deterministic.

pub mod config;
pub mod scenario;
pub mod simulate;

pub use config::SimulationConfig;
pub use scenario::{Scenario, Step};
pub use simulate::{run, RunOutcome, Simulator};
