//! Simulated component controllers

use async_trait::async_trait;
use scenario::{
    BoxedConnectorController, BrokerController, ConnectionParams, ConnectorController, IdentityProviderController,
    ScenarioError, ScenarioResult,
};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Connector controller that only validates its parameters
#[derive(Debug)]
pub struct SimulatedConnector {
    params: ConnectionParams,
    initialized: AtomicBool,
}

impl SimulatedConnector {
    pub fn new(params: ConnectionParams) -> Self {
        Self {
            params,
            initialized: AtomicBool::new(false),
        }
    }

    /// Constructor usable as a connector controller factory
    pub fn boxed(params: ConnectionParams) -> BoxedConnectorController {
        Box::new(Self::new(params))
    }

    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectorController for SimulatedConnector {
    async fn initialize(&self) -> ScenarioResult<()> {
        if self.params.username.is_empty() {
            return Err(ScenarioError::Initialization {
                hostname: self.params.hostname.clone(),
                message: "username must not be empty".to_string(),
            });
        }

        if self.initialized.swap(true, Ordering::SeqCst) {
            warn!("⚠️ Connector {} initialized twice", self.params.hostname);
        }
        info!(
            "🔌 Connector {} initialized with {} endpoints",
            self.params.hostname,
            self.params.endpoints.len()
        );
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SimulatedBroker {
    pub url: String,
}

impl SimulatedBroker {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl BrokerController for SimulatedBroker {}

#[derive(Debug, Clone, Default)]
pub struct SimulatedIdentityProvider;

impl IdentityProviderController for SimulatedIdentityProvider {}
