//! Scenario-controller error types

use shared::SharedError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Environment controller creation failed: {message}")]
    EnvironmentFactory { message: String },

    #[error("Deployment of {deployment_name} failed: {message}")]
    Deployment {
        deployment_name: String,
        message: String,
    },

    #[error("Instance {deployment_name} not available at {url} after {attempts} probes")]
    AvailabilityTimeout {
        deployment_name: String,
        url: String,
        attempts: u32,
        elapsed: Duration,
    },

    #[error("Health probe to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Controller initialization failed for {hostname}: {message}")]
    Initialization { hostname: String, message: String },

    #[error("Environment teardown failed: {message}")]
    Teardown { message: String },

    #[error("Scenario {name} failed: {source}")]
    Scenario {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),
}

impl ScenarioError {
    pub fn configuration(message: impl Into<String>) -> Self {
        ScenarioError::Configuration {
            message: message.into(),
        }
    }
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
