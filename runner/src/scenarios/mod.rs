//! Built-in scenarios
//!
//! Short scenario names runnable from the command line

pub mod core;
pub mod edge;

use anyhow::{anyhow, bail};
use scenario::{Scenario, ScenarioController};
use shared::{Labels, LogLevel};
use std::time::Duration;
use tokio::time::timeout;

const COMPONENT: &str = "runner";

pub struct Scenarios;

impl Scenarios {
    /// Look up a single scenario by name
    pub fn by_name(name: &str) -> Option<Box<dyn Scenario>> {
        match name {
            "basic" => Some(Box::new(self::core::Basic)),
            "brokered" => Some(Box::new(self::core::Brokered)),
            "describe" => Some(Box::new(edge::Describe)),
            _ => None,
        }
    }

    /// Run a scenario, or every scenario for "all"
    pub async fn run(name: &str, controller: &ScenarioController) -> anyhow::Result<()> {
        let scenarios: Vec<Box<dyn Scenario>> = if name == "all" {
            tracing::info!("🧪 Running every built-in scenario");
            Self::individual_scenarios()
                .into_iter()
                .filter_map(Self::by_name)
                .collect()
        } else {
            match Self::by_name(name) {
                Some(scenario) => vec![scenario],
                None => bail!(
                    "Unknown scenario: '{}'. Available: {}",
                    name,
                    Self::available_scenarios().join(", ")
                ),
            }
        };

        for scenario in scenarios {
            controller.run_scenario(scenario.as_ref()).await?;
        }
        Ok(())
    }

    /// Run `name` within `limit`, log the outcome, then tear the environment down
    ///
    /// Teardown runs whatever the outcome. A scenario failure or timeout takes
    /// precedence over a teardown failure in the returned error.
    pub async fn run_to_completion(name: &str, controller: ScenarioController, limit: Duration) -> anyhow::Result<()> {
        let labels = Labels::new();
        let outcome = match timeout(limit, Self::run(name, &controller)).await {
            Ok(Ok(())) => {
                controller.log(LogLevel::Info, &format!("✅ Scenario '{name}' completed"), COMPONENT, &labels);
                Ok(())
            }
            Ok(Err(e)) => {
                controller.log(LogLevel::Error, &format!("❌ Scenario '{name}' failed: {e:#}"), COMPONENT, &labels);
                Err(e)
            }
            Err(_) => {
                controller.log(
                    LogLevel::Error,
                    &format!("⏰ Scenario '{name}' timed out after {limit:?}"),
                    COMPONENT,
                    &labels,
                );
                Err(anyhow!("Scenario '{}' timed out after {:?}", name, limit))
            }
        };

        match (outcome, controller.tear_down().await) {
            (outcome, Ok(())) => outcome,
            (Err(e), Err(teardown_error)) => {
                tracing::error!("❌ Teardown failed after scenario failure: {}", teardown_error);
                Err(e)
            }
            (Ok(()), Err(teardown_error)) => Err(teardown_error.into()),
        }
    }

    pub fn individual_scenarios() -> Vec<&'static str> {
        vec!["basic", "brokered", "describe"]
    }

    /// Get list of available scenarios
    pub fn available_scenarios() -> Vec<&'static str> {
        let mut names = Self::individual_scenarios();
        names.push("all");
        names
    }
}
