//! Edge-case scenarios

use async_trait::async_trait;
use scenario::{Scenario, ScenarioController};
use shared::{Instance, Labels, LogLevel};

/// Describe a remote connector without deploying it
pub struct Describe;

#[async_trait]
impl Scenario for Describe {
    fn name(&self) -> &str {
        "describe"
    }

    async fn run(&self, controller: &ScenarioController) -> anyhow::Result<()> {
        let connector = controller.use_connector("admin", "password", "remote-connector")?;

        let mut labels = Labels::new();
        labels.insert(
            "endpoint_url".to_string(),
            connector.instance_controller.endpoint_url().to_string(),
        );
        controller.log(LogLevel::Info, "Described remote connector", "describe", &labels);
        Ok(())
    }
}
