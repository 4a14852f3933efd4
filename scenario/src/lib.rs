//! Scenario orchestration library for simulated distributed deployments
//!
//! A [`ScenarioController`] deploys identity providers, connectors and brokers
//! into a pluggable environment, waits until each one answers its health
//! check, binds it to a controller and tears the environment down at the end
//! of the scenario. Environment backends, health transports and component
//! controllers are supplied through the traits in [`traits`].

pub mod config;
pub mod controller;
pub mod core;
pub mod error;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use config::{
    BoxedConnectorController, BoxedIdentityProviderController, BoxedInstance, ConnectionParams,
    ConnectorControllerFactory, ConnectorInstanceFactory, IdentityManagement, ScenarioConfiguration,
    ScenarioConfigurationBuilder,
};
pub use controller::{ScenarioController, BOOTSTRAP_PASSWORD, BOOTSTRAP_USERNAME, IDENTITY_PROVIDER_DEPLOYMENT};
pub use self::core::{bind, BoundPair, Broker, Connector, HealthPoller, IdentityProvider};
pub use error::{ScenarioError, ScenarioResult};
pub use services::HttpHealthProbe;
pub use traits::{
    BrokerController, ConnectorController, EnvironmentController, EnvironmentFactory, HealthProbe,
    IdentityProviderController, Scenario,
};
