//! Health polling for freshly deployed instances

use crate::error::{ScenarioError, ScenarioResult};
use crate::traits::HealthProbe;
use shared::{wait_for, Instance, Labels, LogLevel, Logger, RetryPolicy, SharedError};
use std::sync::Arc;
use url::Url;

const COMPONENT: &str = "HealthPoller";

/// The only status code that counts as healthy
pub const HEALTHY_STATUS: u16 = 200;

/// Polls an instance's health-check URL until it answers 200
pub struct HealthPoller {
    probe: Arc<dyn HealthProbe>,
    policy: RetryPolicy,
    logger: Logger,
}

impl HealthPoller {
    pub fn new(probe: Arc<dyn HealthProbe>, policy: RetryPolicy, logger: Logger) -> Self {
        Self { probe, policy, logger }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Wait until `instance` is reachable, returning the number of probes issued
    ///
    /// Instances without a health-check URL are available immediately and are
    /// never probed.
    pub async fn wait_until_available(&self, instance: &dyn Instance) -> ScenarioResult<u32> {
        let Some(url) = instance.health_check_url() else {
            self.log(
                LogLevel::Debug,
                &format!("{} has no health check, treating as available", instance.deployment_name()),
                instance,
            );
            return Ok(0);
        };

        match wait_for(&self.policy, |attempt| self.probe_once(instance, url, attempt)).await {
            Ok(attempts) => {
                self.log(
                    LogLevel::Info,
                    &format!("✅ {} available after {} probes", instance.deployment_name(), attempts),
                    instance,
                );
                Ok(attempts)
            }
            Err(SharedError::RetryExhausted { attempts, elapsed }) => {
                self.log(
                    LogLevel::Error,
                    &format!("⏰ {} did not answer {} within {:?}", url, HEALTHY_STATUS, elapsed),
                    instance,
                );
                Err(ScenarioError::AvailabilityTimeout {
                    deployment_name: instance.deployment_name().to_string(),
                    url: url.to_string(),
                    attempts,
                    elapsed,
                })
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn probe_once(&self, instance: &dyn Instance, url: &Url, attempt: u32) -> bool {
        match self.probe.probe(url).await {
            Ok(status) => {
                self.log(
                    LogLevel::Info,
                    &format!("Waiting for {HEALTHY_STATUS} on {url}, got {status} (attempt {attempt})"),
                    instance,
                );
                status == HEALTHY_STATUS
            }
            Err(e) => {
                self.log(
                    LogLevel::Warn,
                    &format!("Error while waiting for {url}: {e} (attempt {attempt})"),
                    instance,
                );
                false
            }
        }
    }

    fn log(&self, level: LogLevel, text: &str, instance: &dyn Instance) {
        let mut labels = Labels::new();
        labels.insert("deployment".to_string(), instance.deployment_name().to_string());
        self.logger.log(level, text, COMPONENT, &labels);
    }
}
