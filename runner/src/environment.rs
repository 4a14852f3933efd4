//! In-process environment
//!
//! Records deployments instead of provisioning anything, so scenarios can be
//! exercised without a container runtime or cloud account.

use async_trait::async_trait;
use scenario::{EnvironmentController, ScenarioError, ScenarioResult};
use shared::Instance;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// What the local environment remembers about a deployed instance
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentRecord {
    pub deployment_name: String,
    pub hostname: String,
    pub endpoint_url: String,
    pub health_check_url: Option<String>,
}

#[derive(Debug, Default)]
struct LocalState {
    deployments: Vec<DeploymentRecord>,
    torn_down: bool,
}

/// Environment controller keeping all state in memory
#[derive(Debug, Clone, Default)]
pub struct LocalEnvironment {
    state: Arc<Mutex<LocalState>>,
}

impl LocalEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn deployments(&self) -> Vec<DeploymentRecord> {
        self.state.lock().await.deployments.clone()
    }

    pub async fn is_torn_down(&self) -> bool {
        self.state.lock().await.torn_down
    }
}

#[async_trait]
impl EnvironmentController for LocalEnvironment {
    async fn deploy_instance(&self, instance: &dyn Instance) -> ScenarioResult<()> {
        let mut state = self.state.lock().await;
        let deployment_name = instance.deployment_name().to_string();

        if state.torn_down {
            return Err(ScenarioError::Deployment {
                deployment_name,
                message: "environment already torn down".to_string(),
            });
        }
        if state.deployments.iter().any(|d| d.deployment_name == deployment_name) {
            return Err(ScenarioError::Deployment {
                deployment_name,
                message: "deployment name already in use".to_string(),
            });
        }

        info!("📦 Deployed {} ({})", deployment_name, instance.endpoint_url());
        state.deployments.push(DeploymentRecord {
            deployment_name,
            hostname: instance.hostname().to_string(),
            endpoint_url: instance.endpoint_url().to_string(),
            health_check_url: instance.health_check_url().map(|url| url.to_string()),
        });
        Ok(())
    }

    async fn tear_down(&self) -> ScenarioResult<()> {
        let mut state = self.state.lock().await;
        if state.torn_down {
            debug!("Local environment already torn down");
            return Ok(());
        }

        state.torn_down = true;
        info!("🧹 Removed {} local deployments", state.deployments.len());
        Ok(())
    }
}
