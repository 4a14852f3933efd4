//! Core shared types: deployable instances and their connection data

use crate::errors::{SharedError, SharedResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use url::Url;

/// Structured context attached to a log event
pub type Labels = HashMap<String, String>;

/// Severity of a log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Named network endpoint exposed by an instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            port,
        }
    }
}

/// Username/password pair handed to instances and controllers
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A deployable unit within the simulated environment
///
/// Environment backends and controller factories only see instances through
/// this trait, so any component-specific description can be deployed as long
/// as it exposes its addressing data.
pub trait Instance: Send + Sync {
    fn deployment_name(&self) -> &str;

    fn set_deployment_name(&mut self, name: &str);

    fn hostname(&self) -> &str;

    fn set_hostname(&mut self, hostname: &str);

    fn endpoint_url(&self) -> &str;

    fn set_endpoint_url(&mut self, url: &str);

    fn endpoints(&self) -> &[Endpoint];

    /// `None` means the instance counts as available as soon as it is deployed
    fn health_check_url(&self) -> Option<&Url>;

    /// Point every addressing field at `hostname`
    fn assign_host(&mut self, hostname: &str) {
        self.set_endpoint_url(&format!("https://{hostname}"));
        self.set_hostname(hostname);
        self.set_deployment_name(hostname);
    }
}

impl<T: Instance + ?Sized> Instance for Box<T> {
    fn deployment_name(&self) -> &str {
        (**self).deployment_name()
    }

    fn set_deployment_name(&mut self, name: &str) {
        (**self).set_deployment_name(name)
    }

    fn hostname(&self) -> &str {
        (**self).hostname()
    }

    fn set_hostname(&mut self, hostname: &str) {
        (**self).set_hostname(hostname)
    }

    fn endpoint_url(&self) -> &str {
        (**self).endpoint_url()
    }

    fn set_endpoint_url(&mut self, url: &str) {
        (**self).set_endpoint_url(url)
    }

    fn endpoints(&self) -> &[Endpoint] {
        (**self).endpoints()
    }

    fn health_check_url(&self) -> Option<&Url> {
        (**self).health_check_url()
    }

    fn assign_host(&mut self, hostname: &str) {
        (**self).assign_host(hostname)
    }
}

/// Stock [`Instance`] implementation used by default factories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceDescriptor {
    pub deployment_name: String,
    pub hostname: String,
    pub endpoint_url: String,
    pub endpoints: Vec<Endpoint>,
    pub health_check_url: Option<Url>,
    pub credentials: Option<Credentials>,
    pub labels: Labels,
}

impl InstanceDescriptor {
    pub fn new(deployment_name: impl Into<String>) -> Self {
        let deployment_name = deployment_name.into();
        Self {
            hostname: deployment_name.clone(),
            endpoint_url: format!("https://{deployment_name}"),
            deployment_name,
            endpoints: Vec::new(),
            health_check_url: None,
            credentials: None,
            labels: Labels::new(),
        }
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Attach a health-check URL, rejecting anything that does not parse
    pub fn with_health_check(mut self, url: &str) -> SharedResult<Self> {
        let parsed = Url::parse(url).map_err(|_| SharedError::InvalidUrl {
            input: url.to_string(),
        })?;
        self.health_check_url = Some(parsed);
        Ok(self)
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }
}

impl Instance for InstanceDescriptor {
    fn deployment_name(&self) -> &str {
        &self.deployment_name
    }

    fn set_deployment_name(&mut self, name: &str) {
        self.deployment_name = name.to_string();
    }

    fn hostname(&self) -> &str {
        &self.hostname
    }

    fn set_hostname(&mut self, hostname: &str) {
        self.hostname = hostname.to_string();
    }

    fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    fn set_endpoint_url(&mut self, url: &str) {
        self.endpoint_url = url.to_string();
    }

    fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    fn health_check_url(&self) -> Option<&Url> {
        self.health_check_url.as_ref()
    }
}
