//! Scenario Controller
//!
//! Owns the scenario configuration and the environment handle for one
//! scenario run. Every start operation follows the same order: deploy the
//! instance, wait until it answers its health check, then initialize its
//! controller. A bound pair is only handed back once all steps succeeded.

use crate::config::{
    BoxedIdentityProviderController, BoxedInstance, ConnectionParams, ConnectorControllerFactory,
    IdentityManagement, ScenarioConfiguration,
};
use crate::core::binder::{self, bind};
use crate::core::{Broker, Connector, HealthPoller, IdentityProvider};
use crate::error::{ScenarioError, ScenarioResult};
use crate::traits::{BrokerController, EnvironmentController, Scenario};
use shared::{Credentials, Instance, Labels, LogLevel};
use std::time::Duration;
use uuid::Uuid;

const COMPONENT: &str = "ScenarioController";

/// Deployment name of the identity provider bootstrapped during initiation
pub const IDENTITY_PROVIDER_DEPLOYMENT: &str = "identity-provider";
pub const BOOTSTRAP_USERNAME: &str = "myAdmin";
pub const BOOTSTRAP_PASSWORD: &str = "myPassword";

pub struct ScenarioController {
    configuration: ScenarioConfiguration,
    environment: Box<dyn EnvironmentController>,
    poller: HealthPoller,
    identity_provider: Option<IdentityProvider>,
    run_id: Uuid,
}

impl ScenarioController {
    /// Create the environment and, with identity management configured,
    /// bootstrap the default identity provider
    pub async fn initiate(configuration: ScenarioConfiguration) -> ScenarioResult<Self> {
        let environment = configuration.environment_factory.create().await?;
        let poller = HealthPoller::new(
            configuration.health_probe.clone(),
            configuration.retry_policy.clone(),
            configuration.logger.clone(),
        );

        let mut controller = Self {
            configuration,
            environment,
            poller,
            identity_provider: None,
            run_id: Uuid::new_v4(),
        };
        controller.emit(LogLevel::Info, "🚀 Scenario controller initiated");

        if controller.configuration.has_identity_management() {
            let provider = controller
                .start_identity_provider(BOOTSTRAP_USERNAME, BOOTSTRAP_PASSWORD, None)
                .await?;
            controller.identity_provider = Some(provider);
        }

        Ok(controller)
    }

    /// Run `scenario` with this controller as its execution context
    pub async fn run_scenario(&self, scenario: &dyn Scenario) -> ScenarioResult<()> {
        let name = scenario.name().to_string();
        self.emit(LogLevel::Info, &format!("🧪 Running scenario {name}"));

        match scenario.run(self).await {
            Ok(()) => {
                self.emit(LogLevel::Info, &format!("✅ Scenario {name} finished"));
                Ok(())
            }
            Err(e) => {
                self.emit(LogLevel::Error, &format!("❌ Scenario {name} failed: {e:#}"));
                Err(ScenarioError::Scenario {
                    name,
                    source: e.into(),
                })
            }
        }
    }

    /// Forward a log event to the logger facade; never fails
    pub fn log(&self, level: LogLevel, text: &str, source_component: &str, labels: &Labels) {
        self.configuration.logger.log(level, text, source_component, labels);
    }

    /// Deploy an identity provider using explicit factories or the configured defaults
    pub(crate) async fn start_identity_provider(
        &self,
        username: &str,
        password: &str,
        explicit: Option<&IdentityManagement>,
    ) -> ScenarioResult<IdentityProvider> {
        let factories =
            binder::resolve_identity_management(explicit, self.configuration.identity_management.as_ref())?;

        self.emit(LogLevel::Info, "Starting Identity Provider");
        let credentials = Credentials::new(username, password);
        let instance = (factories.instance_factory)(IDENTITY_PROVIDER_DEPLOYMENT, &credentials);
        self.deploy_and_wait(&*instance).await?;

        let controller: BoxedIdentityProviderController = (factories.controller_factory)();
        Ok(bind(instance, controller))
    }

    /// Describe a connector from the configured defaults without deploying it
    ///
    /// Nothing is deployed, probed or initialized. Use [`Self::start_connector`]
    /// to bring a connector up in the environment. Currently infallible; the
    /// `Result` matches the other start/use operations.
    pub fn use_connector(&self, username: &str, password: &str, hostname: &str) -> ScenarioResult<Connector> {
        let mut instance = (self.configuration.connector_instance_factory)(hostname);
        instance.assign_host(hostname);

        let params = ConnectionParams::new(hostname, username, password, instance.endpoints());
        let controller = (self.configuration.connector_controller_factory)(params);
        Ok(bind(instance, controller))
    }

    /// Deploy a connector, wait until it is reachable, then initialize its controller
    ///
    /// `instance` and `controller_factory` override the configured defaults.
    pub async fn start_connector(
        &self,
        username: &str,
        password: &str,
        hostname: &str,
        instance: Option<BoxedInstance>,
        controller_factory: Option<ConnectorControllerFactory>,
    ) -> ScenarioResult<Connector> {
        self.emit(LogLevel::Info, &format!("Starting Connector {hostname}"));

        let instance = match instance {
            Some(instance) => instance,
            None => {
                let mut instance = (self.configuration.connector_instance_factory)(hostname);
                instance.assign_host(hostname);
                instance
            }
        };
        let factory = binder::resolve_connector_controller(
            controller_factory.as_ref(),
            &self.configuration.connector_controller_factory,
        );
        let controller = factory(ConnectionParams::new(hostname, username, password, instance.endpoints()));

        self.deploy_and_wait(&*instance).await?;
        controller.initialize().await?;

        self.emit(LogLevel::Info, &format!("✅ Connector {hostname} ready"));
        Ok(bind(instance, controller))
    }

    /// Deploy a broker and wait until it is reachable
    ///
    /// The controller is handed over ready to use and is not initialized here.
    pub async fn start_broker<I, C>(&self, instance: I, controller: C) -> ScenarioResult<Broker<I, C>>
    where
        I: Instance,
        C: BrokerController,
    {
        self.emit(
            LogLevel::Info,
            &format!("Starting Broker {}", instance.deployment_name()),
        );
        self.deploy_and_wait(&instance).await?;
        Ok(bind(instance, controller))
    }

    /// Suspend the calling flow for at least `ms` milliseconds
    pub async fn wait(&self, ms: u64) {
        self.emit(LogLevel::Info, &format!("⏳ Waiting for {ms}ms"));
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    /// Tear the environment down, consuming the controller
    pub async fn tear_down(self) -> ScenarioResult<()> {
        self.emit(LogLevel::Info, "🛑 Tearing down environment");
        self.environment.tear_down().await
    }

    pub fn configuration(&self) -> &ScenarioConfiguration {
        &self.configuration
    }

    pub fn environment(&self) -> &dyn EnvironmentController {
        self.environment.as_ref()
    }

    /// Identity provider bootstrapped during initiation, if any
    pub fn identity_provider(&self) -> Option<&IdentityProvider> {
        self.identity_provider.as_ref()
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    async fn deploy_and_wait(&self, instance: &dyn Instance) -> ScenarioResult<()> {
        self.environment.deploy_instance(instance).await?;
        self.poller.wait_until_available(instance).await?;
        Ok(())
    }

    fn emit(&self, level: LogLevel, text: &str) {
        let mut labels = Labels::new();
        labels.insert("run_id".to_string(), self.run_id.to_string());
        self.log(level, text, COMPONENT, &labels);
    }
}
