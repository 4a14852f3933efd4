//! Component binding: pairing instances with their controllers
//!
//! Every start/use operation resolves its factories the same way: a
//! caller-supplied factory wins, otherwise the configuration default is used,
//! otherwise the operation fails with a configuration error.

use crate::config::{
    BoxedConnectorController, BoxedIdentityProviderController, BoxedInstance, ConnectorControllerFactory,
    IdentityManagement,
};
use crate::error::{ScenarioError, ScenarioResult};
use shared::Instance;

/// An instance together with the controller driving it
#[derive(Debug, Clone, PartialEq)]
pub struct BoundPair<I, C> {
    pub instance_controller: I,
    pub component_controller: C,
}

impl<I, C> BoundPair<I, C> {
    pub fn into_parts(self) -> (I, C) {
        (self.instance_controller, self.component_controller)
    }
}

pub type Connector<I = BoxedInstance, C = BoxedConnectorController> = BoundPair<I, C>;
pub type Broker<I, C> = BoundPair<I, C>;
pub type IdentityProvider<I = BoxedInstance, C = BoxedIdentityProviderController> = BoundPair<I, C>;

/// Pair an instance with its controller
pub fn bind<I: Instance, C>(instance: I, controller: C) -> BoundPair<I, C> {
    BoundPair {
        instance_controller: instance,
        component_controller: controller,
    }
}

pub fn resolve_connector_controller<'a>(
    explicit: Option<&'a ConnectorControllerFactory>,
    default: &'a ConnectorControllerFactory,
) -> &'a ConnectorControllerFactory {
    explicit.unwrap_or(default)
}

pub fn resolve_identity_management<'a>(
    explicit: Option<&'a IdentityManagement>,
    default: Option<&'a IdentityManagement>,
) -> ScenarioResult<&'a IdentityManagement> {
    explicit
        .or(default)
        .ok_or_else(|| ScenarioError::configuration("Default identity management not set in this configuration"))
}
