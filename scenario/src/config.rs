//! Scenario Configuration
//!
//! Immutable input to a scenario run: how to create the environment, which
//! factories produce default connector and identity-provider components, and
//! the health-polling policy. Built with [`ScenarioConfigurationBuilder`].

use crate::error::{ScenarioError, ScenarioResult};
use crate::services::HttpHealthProbe;
use crate::traits::{ConnectorController, EnvironmentFactory, HealthProbe, IdentityProviderController};
use shared::{Credentials, Endpoint, Instance, Logger, RetryPolicy};
use std::fmt;
use std::sync::Arc;

pub type BoxedInstance = Box<dyn Instance>;
pub type BoxedConnectorController = Box<dyn ConnectorController>;
pub type BoxedIdentityProviderController = Box<dyn IdentityProviderController>;

/// Builds a connector instance description for a hostname
pub type ConnectorInstanceFactory = Arc<dyn Fn(&str) -> BoxedInstance + Send + Sync>;
/// Builds a connector controller from its connection parameters
pub type ConnectorControllerFactory = Arc<dyn Fn(ConnectionParams) -> BoxedConnectorController + Send + Sync>;
/// Builds an identity-provider instance from its deployment name and credentials
pub type IdentityProviderInstanceFactory = Arc<dyn Fn(&str, &Credentials) -> BoxedInstance + Send + Sync>;
pub type IdentityProviderControllerFactory = Arc<dyn Fn() -> BoxedIdentityProviderController + Send + Sync>;

/// Everything a component controller needs to reach its instance
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionParams {
    pub hostname: String,
    pub username: String,
    pub password: String,
    pub endpoints: Vec<Endpoint>,
}

impl ConnectionParams {
    pub fn new(hostname: &str, username: &str, password: &str, endpoints: &[Endpoint]) -> Self {
        Self {
            hostname: hostname.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            endpoints: endpoints.to_vec(),
        }
    }
}

/// Factories for the identity-provider role
///
/// Instance and controller factories always travel together: an override
/// replaces both or neither.
#[derive(Clone)]
pub struct IdentityManagement {
    pub instance_factory: IdentityProviderInstanceFactory,
    pub controller_factory: IdentityProviderControllerFactory,
}

impl IdentityManagement {
    pub fn new<I, C>(instance_factory: I, controller_factory: C) -> Self
    where
        I: Fn(&str, &Credentials) -> BoxedInstance + Send + Sync + 'static,
        C: Fn() -> BoxedIdentityProviderController + Send + Sync + 'static,
    {
        Self {
            instance_factory: Arc::new(instance_factory),
            controller_factory: Arc::new(controller_factory),
        }
    }
}

impl fmt::Debug for IdentityManagement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityManagement").finish_non_exhaustive()
    }
}

pub struct ScenarioConfiguration {
    pub(crate) environment_factory: Arc<dyn EnvironmentFactory>,
    pub(crate) connector_instance_factory: ConnectorInstanceFactory,
    pub(crate) connector_controller_factory: ConnectorControllerFactory,
    pub(crate) identity_management: Option<IdentityManagement>,
    pub(crate) retry_policy: RetryPolicy,
    pub(crate) health_probe: Arc<dyn HealthProbe>,
    pub(crate) logger: Logger,
}

impl ScenarioConfiguration {
    pub fn builder() -> ScenarioConfigurationBuilder {
        ScenarioConfigurationBuilder::new()
    }

    /// Whether an identity provider is bootstrapped during initiation
    pub fn has_identity_management(&self) -> bool {
        self.identity_management.is_some()
    }

    pub fn identity_management(&self) -> Option<&IdentityManagement> {
        self.identity_management.as_ref()
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl fmt::Debug for ScenarioConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioConfiguration")
            .field("identity_management", &self.identity_management.is_some())
            .field("retry_policy", &self.retry_policy)
            .field("logger", &self.logger)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ScenarioConfiguration`]
#[derive(Default)]
pub struct ScenarioConfigurationBuilder {
    environment_factory: Option<Arc<dyn EnvironmentFactory>>,
    connector_instance_factory: Option<ConnectorInstanceFactory>,
    connector_controller_factory: Option<ConnectorControllerFactory>,
    identity_management: Option<IdentityManagement>,
    retry_policy: Option<RetryPolicy>,
    health_probe: Option<Arc<dyn HealthProbe>>,
    logger: Option<Logger>,
}

impl ScenarioConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the factory producing the environment controller (required)
    pub fn environment_factory<F>(mut self, factory: F) -> Self
    where
        F: EnvironmentFactory + 'static,
    {
        self.environment_factory = Some(Arc::new(factory));
        self
    }

    /// Set the default connector instance factory, keyed by hostname (required)
    pub fn connector_instance_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&str) -> BoxedInstance + Send + Sync + 'static,
    {
        self.connector_instance_factory = Some(Arc::new(factory));
        self
    }

    /// Set the default connector controller constructor (required)
    pub fn connector_controller_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(ConnectionParams) -> BoxedConnectorController + Send + Sync + 'static,
    {
        self.connector_controller_factory = Some(Arc::new(factory));
        self
    }

    /// Enable identity management with these default factories
    pub fn identity_management(mut self, identity_management: IdentityManagement) -> Self {
        self.identity_management = Some(identity_management);
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Replace the HTTP health probe
    pub fn health_probe(mut self, probe: Arc<dyn HealthProbe>) -> Self {
        self.health_probe = Some(probe);
        self
    }

    /// Log through this handle instead of the process-wide logger
    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn build(self) -> ScenarioResult<ScenarioConfiguration> {
        let environment_factory = self
            .environment_factory
            .ok_or_else(|| ScenarioError::configuration("environment factory not set"))?;
        let connector_instance_factory = self
            .connector_instance_factory
            .ok_or_else(|| ScenarioError::configuration("default connector instance factory not set"))?;
        let connector_controller_factory = self
            .connector_controller_factory
            .ok_or_else(|| ScenarioError::configuration("default connector controller factory not set"))?;

        let health_probe = match self.health_probe {
            Some(probe) => probe,
            None => Arc::new(HttpHealthProbe::new()?),
        };

        Ok(ScenarioConfiguration {
            environment_factory,
            connector_instance_factory,
            connector_controller_factory,
            identity_management: self.identity_management,
            retry_policy: self.retry_policy.unwrap_or_default(),
            health_probe,
            logger: self.logger.unwrap_or_else(Logger::global),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{EnvironmentController, MockConnectorController};
    use shared::InstanceDescriptor;

    struct NoopEnvironment;

    #[async_trait::async_trait]
    impl EnvironmentController for NoopEnvironment {
        async fn deploy_instance(&self, _instance: &dyn Instance) -> ScenarioResult<()> {
            Ok(())
        }

        async fn tear_down(&self) -> ScenarioResult<()> {
            Ok(())
        }
    }

    fn complete_builder() -> ScenarioConfigurationBuilder {
        ScenarioConfiguration::builder()
            .environment_factory(|| async { Ok::<_, ScenarioError>(Box::new(NoopEnvironment) as Box<dyn EnvironmentController>) })
            .connector_instance_factory(|hostname: &str| Box::new(InstanceDescriptor::new(hostname)) as BoxedInstance)
            .connector_controller_factory(|_params: ConnectionParams| {
                Box::new(MockConnectorController::new()) as BoxedConnectorController
            })
    }

    #[test]
    fn test_build_with_required_fields() {
        let configuration = complete_builder().build().unwrap();

        assert!(!configuration.has_identity_management());
        assert_eq!(configuration.retry_policy(), &RetryPolicy::default());
    }

    #[test]
    fn test_missing_environment_factory_is_configuration_error() {
        let result = ScenarioConfiguration::builder()
            .connector_instance_factory(|hostname: &str| Box::new(InstanceDescriptor::new(hostname)) as BoxedInstance)
            .build();

        match result {
            Err(ScenarioError::Configuration { message }) => assert!(message.contains("environment factory")),
            other => panic!("Expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_connector_controller_factory_is_configuration_error() {
        let result = ScenarioConfiguration::builder()
            .environment_factory(|| async { Ok::<_, ScenarioError>(Box::new(NoopEnvironment) as Box<dyn EnvironmentController>) })
            .connector_instance_factory(|hostname: &str| Box::new(InstanceDescriptor::new(hostname)) as BoxedInstance)
            .build();

        assert!(matches!(result, Err(ScenarioError::Configuration { .. })));
    }

    #[test]
    fn test_identity_management_flag_follows_defaults() {
        let configuration = complete_builder()
            .identity_management(IdentityManagement::new(
                |name: &str, _credentials: &Credentials| Box::new(InstanceDescriptor::new(name)) as BoxedInstance,
                || {
                    struct Idp;
                    impl IdentityProviderController for Idp {}
                    Box::new(Idp) as BoxedIdentityProviderController
                },
            ))
            .build()
            .unwrap();

        assert!(configuration.has_identity_management());
        assert!(configuration.identity_management().is_some());
    }

    #[test]
    fn test_connection_params_copy_endpoints() {
        let endpoints = vec![Endpoint::new("ids", 8080), Endpoint::new("api", 443)];
        let params = ConnectionParams::new("host-a", "u", "p", &endpoints);

        assert_eq!(params.hostname, "host-a");
        assert_eq!(params.endpoints, endpoints);
    }
}
