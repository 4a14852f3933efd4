//! Scenario runner
//!
//! Runs the built-in scenarios against an in-process environment with
//! simulated component controllers.

pub mod config;
pub mod controllers;
pub mod environment;
pub mod scenarios;

pub use config::RunnerConfig;
pub use controllers::{SimulatedBroker, SimulatedConnector, SimulatedIdentityProvider};
pub use environment::{DeploymentRecord, LocalEnvironment};
pub use scenarios::Scenarios;
