//! Core orchestration building blocks

pub mod binder;
pub mod health;

pub use binder::{bind, BoundPair, Broker, Connector, IdentityProvider};
pub use health::HealthPoller;
