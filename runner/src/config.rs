//! Runner Configuration
//!
//! Turns command-line choices into a scenario configuration wired to the
//! local environment and the simulated controllers.

use crate::controllers::{SimulatedConnector, SimulatedIdentityProvider};
use crate::environment::LocalEnvironment;
use scenario::{
    BoxedIdentityProviderController, BoxedInstance, EnvironmentController, IdentityManagement, ScenarioConfiguration,
    ScenarioError, ScenarioResult,
};
use shared::{Credentials, Endpoint, InstanceDescriptor, Logger, RetryPolicy};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Bootstrap an identity provider during initiation
    pub identity_management: bool,
    pub retry_policy: RetryPolicy,
    /// Endpoints every default connector instance exposes
    pub connector_endpoints: Vec<Endpoint>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            identity_management: false,
            retry_policy: RetryPolicy::fixed(Duration::from_millis(250), 20),
            connector_endpoints: vec![Endpoint::new("ids", 8080), Endpoint::new("api", 8443)],
        }
    }
}

impl RunnerConfig {
    pub fn with_identity_management(mut self, enabled: bool) -> Self {
        self.identity_management = enabled;
        self
    }

    pub fn scenario_configuration(
        &self,
        environment: LocalEnvironment,
        logger: Logger,
    ) -> ScenarioResult<ScenarioConfiguration> {
        let endpoints = self.connector_endpoints.clone();

        let mut builder = ScenarioConfiguration::builder()
            .environment_factory(move || {
                let environment = environment.clone();
                async move { Ok::<_, ScenarioError>(Box::new(environment) as Box<dyn EnvironmentController>) }
            })
            .connector_instance_factory(move |hostname: &str| {
                let instance = endpoints
                    .iter()
                    .cloned()
                    .fold(InstanceDescriptor::new(hostname), InstanceDescriptor::with_endpoint);
                Box::new(instance) as BoxedInstance
            })
            .connector_controller_factory(SimulatedConnector::boxed)
            .retry_policy(self.retry_policy.clone())
            .logger(logger);

        if self.identity_management {
            builder = builder.identity_management(IdentityManagement::new(
                |deployment_name: &str, credentials: &Credentials| {
                    let instance = InstanceDescriptor::new(deployment_name)
                        .with_credentials(credentials.clone())
                        .with_endpoint(Endpoint::new("oidc", 8443));
                    Box::new(instance) as BoxedInstance
                },
                || Box::new(SimulatedIdentityProvider) as BoxedIdentityProviderController,
            ));
        }

        builder.build()
    }
}
