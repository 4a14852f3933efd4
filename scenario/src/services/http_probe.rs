//! HTTP health probe backed by reqwest

use crate::error::{ScenarioError, ScenarioResult};
use crate::traits::HealthProbe;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Issues a GET to the health-check URL and reports the status code
///
/// Redirects are not followed: a 3xx answer is reported as-is.
#[derive(Debug, Clone)]
pub struct HttpHealthProbe {
    client: reqwest::Client,
}

impl HttpHealthProbe {
    /// Upper bound for a single probe; the retry policy owns the overall budget
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new() -> ScenarioResult<Self> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> ScenarioResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ScenarioError::configuration(format!("failed to build health probe client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn probe(&self, url: &Url) -> ScenarioResult<u16> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ScenarioError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        debug!("Health probe {} answered {}", url, status);
        Ok(status)
    }
}
