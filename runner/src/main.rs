//! Scenario Runner
//!
//! Command-line entry point that:
//! - Builds a scenario configuration for the local environment
//! - Initiates the scenario controller
//! - Runs the selected scenario under a timeout, then tears the environment down

use anyhow::Result;
use clap::Parser;
use std::time::Duration;

use runner::{LocalEnvironment, RunnerConfig, Scenarios};
use scenario::ScenarioController;
use shared::logging::init_tracing_with_level;
use shared::Logger;

#[derive(Parser)]
#[command(name = "runner")]
#[command(about = "Runs orchestration scenarios against a local environment")]
struct Args {
    /// Scenario to run
    #[arg(long, default_value = "basic")]
    scenario: String,

    /// Scenario timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// Bootstrap an identity provider before running the scenario
    #[arg(long)]
    identity_management: bool,

    /// Enable verbose tracing output
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing_with_level(Some(if args.verbose { "debug" } else { "info" }));

    tracing::info!("🧪 Starting scenario runner");
    tracing::info!("Scenario: {}, Timeout: {}s", args.scenario, args.timeout_secs);

    let environment = LocalEnvironment::new();
    let configuration = RunnerConfig::default()
        .with_identity_management(args.identity_management)
        .scenario_configuration(environment.clone(), Logger::global())?;

    let controller = ScenarioController::initiate(configuration).await?;
    tracing::info!("Run id: {}", controller.run_id());

    let result = Scenarios::run_to_completion(
        &args.scenario,
        controller,
        Duration::from_secs(args.timeout_secs),
    )
    .await;

    tracing::info!(
        "🏁 Run finished with {} recorded deployments",
        environment.deployments().await.len()
    );
    result
}
