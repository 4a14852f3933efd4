//! Core deployment scenarios

use crate::controllers::SimulatedBroker;
use async_trait::async_trait;
use scenario::{Scenario, ScenarioController};
use shared::{Endpoint, Instance, InstanceDescriptor, Labels, LogLevel};

const ADMIN_USER: &str = "admin";
const ADMIN_PASSWORD: &str = "password";

/// Two connectors started one after the other
pub struct Basic;

#[async_trait]
impl Scenario for Basic {
    fn name(&self) -> &str {
        "basic"
    }

    async fn run(&self, controller: &ScenarioController) -> anyhow::Result<()> {
        let first = controller
            .start_connector(ADMIN_USER, ADMIN_PASSWORD, "connector-a", None, None)
            .await?;
        let second = controller
            .start_connector(ADMIN_USER, ADMIN_PASSWORD, "connector-b", None, None)
            .await?;

        controller.wait(10).await;

        let mut labels = Labels::new();
        labels.insert("first".to_string(), first.instance_controller.endpoint_url().to_string());
        labels.insert("second".to_string(), second.instance_controller.endpoint_url().to_string());
        controller.log(LogLevel::Info, "Connectors ready", "basic", &labels);
        Ok(())
    }
}

/// A broker followed by a connector registering with it
pub struct Brokered;

#[async_trait]
impl Scenario for Brokered {
    fn name(&self) -> &str {
        "brokered"
    }

    async fn run(&self, controller: &ScenarioController) -> anyhow::Result<()> {
        let broker_instance = InstanceDescriptor::new("broker")
            .with_hostname("broker")
            .with_endpoint(Endpoint::new("broker", 8081));
        let broker = controller
            .start_broker(broker_instance, SimulatedBroker::new("https://broker"))
            .await?;

        let connector = controller
            .start_connector(ADMIN_USER, ADMIN_PASSWORD, "connector-c", None, None)
            .await?;

        let mut labels = Labels::new();
        labels.insert("broker".to_string(), broker.component_controller.url.clone());
        labels.insert("connector".to_string(), connector.instance_controller.hostname().to_string());
        controller.log(LogLevel::Info, "Connector attached to broker", "brokered", &labels);
        Ok(())
    }
}
