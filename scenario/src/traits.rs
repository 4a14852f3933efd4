//! Collaborator traits the scenario controller is wired against
//!
//! Environment backends, health transports, component controllers and
//! scenario scripts all live outside this crate. The controller only sees them
//! through these traits, which also makes every collaborator mockable.

use crate::controller::ScenarioController;
use crate::error::ScenarioResult;
use shared::Instance;
use std::future::Future;
use url::Url;

/// Backend that provisions and destroys instances
#[async_trait::async_trait]
pub trait EnvironmentController: Send + Sync {
    /// Create the compute resources backing `instance`
    async fn deploy_instance(&self, instance: &dyn Instance) -> ScenarioResult<()>;

    /// Destroy everything deployed so far
    ///
    /// Called once per scenario; repeated calls are the backend's concern.
    async fn tear_down(&self) -> ScenarioResult<()>;
}

/// Asynchronous constructor for the environment controller
#[async_trait::async_trait]
pub trait EnvironmentFactory: Send + Sync {
    async fn create(&self) -> ScenarioResult<Box<dyn EnvironmentController>>;
}

#[async_trait::async_trait]
impl<F, Fut> EnvironmentFactory for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = ScenarioResult<Box<dyn EnvironmentController>>> + Send + 'static,
{
    async fn create(&self) -> ScenarioResult<Box<dyn EnvironmentController>> {
        self().await
    }
}

/// Transport issuing a single reachability probe
#[mockall::automock]
#[async_trait::async_trait]
pub trait HealthProbe: Send + Sync {
    /// Probe `url` once and return the HTTP status code
    ///
    /// Transport failures come back as errors and are retried by the caller.
    async fn probe(&self, url: &Url) -> ScenarioResult<u16>;
}

/// Control-plane object bound to a deployed connector
#[mockall::automock]
#[async_trait::async_trait]
pub trait ConnectorController: Send + Sync {
    /// Runs once the connector instance answers its health check
    async fn initialize(&self) -> ScenarioResult<()>;
}

/// Control-plane object bound to a broker, handed over ready to use
pub trait BrokerController: Send + Sync {}

impl<T: BrokerController + ?Sized> BrokerController for Box<T> {}

/// Control-plane object bound to an identity provider, handed over ready to use
pub trait IdentityProviderController: Send + Sync {}

impl<T: IdentityProviderController + ?Sized> IdentityProviderController for Box<T> {}

/// Scenario script executed against a live controller
#[async_trait::async_trait]
pub trait Scenario: Send + Sync {
    fn name(&self) -> &str {
        "scenario"
    }

    async fn run(&self, controller: &ScenarioController) -> anyhow::Result<()>;
}
