//! `quorum`: replay governance scenarios against an in-memory engine.

use std::io::Write;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use quorum_cli::{run, Scenario, SimulationConfig, Simulator};
use quorum_utils::LogFormat;

#[derive(Parser)]
#[command(name = "quorum", about = "Token-weighted governance simulator")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    /// `RUST_LOG` takes precedence when set.
    #[arg(long, default_value = "info", env = "QUORUM_LOG_LEVEL", global = true)]
    log_level: String,

    /// Log output format: "human" or "json". Logs go to stderr.
    #[arg(long, default_value = "human", env = "QUORUM_LOG_FORMAT", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Replay a scenario and print one JSON line per step plus a summary.
    Simulate {
        /// Path to the TOML simulation config.
        #[arg(long, env = "QUORUM_CONFIG")]
        config: PathBuf,

        /// Path to the TOML scenario.
        #[arg(long)]
        scenario: PathBuf,

        /// Stop at the first failed step and exit non-zero.
        #[arg(long)]
        fail_fast: bool,
    },
    /// Validate a config file and print the organization identity.
    CheckConfig {
        #[arg(long, env = "QUORUM_CONFIG")]
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    quorum_utils::init_logging(cli.log_format, &cli.log_level)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Simulate {
            config,
            scenario,
            fail_fast,
        } => {
            let config = SimulationConfig::load(&config)?;
            let scenario = Scenario::load(&scenario)?;
            tracing::info!(steps = scenario.steps.len(), "replaying scenario");
            let outcome = run(&config, &scenario, fail_fast, &mut out)?;
            out.flush()?;
            if fail_fast && outcome.failed > 0 {
                bail!("scenario stopped after a failed step");
            }
        }
        Command::CheckConfig { config } => {
            let config = SimulationConfig::load(&config)?;
            let sim = Simulator::new(&config)?;
            writeln!(out, "config ok: organization {}", sim.organization())?;
        }
    }

    Ok(())
}
