//! Recording collaborators and the harness wiring them into a configuration

use super::fixtures::TestFixtures;
use scenario::{
    BoxedConnectorController, BoxedIdentityProviderController, BoxedInstance, ConnectionParams,
    ConnectorController, EnvironmentController, HealthProbe, IdentityManagement, IdentityProviderController,
    ScenarioConfiguration, ScenarioConfigurationBuilder, ScenarioController, ScenarioError, ScenarioResult,
};
use shared::{Credentials, Instance, InstanceDescriptor, Logger, MemorySink, RetryPolicy};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// Observable side effect of an orchestration step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Deployed(String),
    Probed(String),
    Initialized(String),
    TornDown,
}

/// Ordered record of events shared by all recording collaborators
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Event>>>);

impl Journal {
    pub fn record(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn deployments(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Deployed(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn probes(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, Event::Probed(_)))
            .count()
    }
}

/// Environment that records deployments instead of creating anything
#[derive(Clone)]
pub struct RecordingEnvironment {
    journal: Journal,
    fail_deployments: bool,
    teardowns: Arc<AtomicU32>,
}

impl RecordingEnvironment {
    pub fn teardowns(&self) -> u32 {
        self.teardowns.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl EnvironmentController for RecordingEnvironment {
    async fn deploy_instance(&self, instance: &dyn Instance) -> ScenarioResult<()> {
        if self.fail_deployments {
            return Err(ScenarioError::Deployment {
                deployment_name: instance.deployment_name().to_string(),
                message: "quota exceeded".to_string(),
            });
        }
        self.journal
            .record(Event::Deployed(instance.deployment_name().to_string()));
        Ok(())
    }

    async fn tear_down(&self) -> ScenarioResult<()> {
        self.teardowns.fetch_add(1, Ordering::SeqCst);
        self.journal.record(Event::TornDown);
        Ok(())
    }
}

/// Scripted reply for one health probe
#[derive(Debug, Clone, Copy)]
pub enum ProbeReply {
    Status(u16),
    TransportError,
}

/// Health probe replaying scripted replies, then repeating a fallback
pub struct ScriptedProbe {
    journal: Journal,
    replies: Mutex<VecDeque<ProbeReply>>,
    fallback: ProbeReply,
    calls: AtomicU32,
}

impl ScriptedProbe {
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl HealthProbe for ScriptedProbe {
    async fn probe(&self, url: &Url) -> ScenarioResult<u16> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.journal.record(Event::Probed(url.to_string()));

        let reply = self.replies.lock().unwrap().pop_front().unwrap_or(self.fallback);
        match reply {
            ProbeReply::Status(status) => Ok(status),
            ProbeReply::TransportError => Err(ScenarioError::Transport {
                url: url.to_string(),
                message: "connection refused".to_string(),
            }),
        }
    }
}

/// Connector controller recording its initialization
pub struct JournalingConnector {
    params: ConnectionParams,
    journal: Journal,
    initialize_calls: Arc<AtomicU32>,
}

#[async_trait::async_trait]
impl ConnectorController for JournalingConnector {
    async fn initialize(&self) -> ScenarioResult<()> {
        self.initialize_calls.fetch_add(1, Ordering::SeqCst);
        self.journal
            .record(Event::Initialized(self.params.hostname.clone()));
        Ok(())
    }
}

pub struct RecordingIdentityProvider;

impl IdentityProviderController for RecordingIdentityProvider {}

/// Bundles the recording collaborators behind a scenario configuration
pub struct TestHarness {
    pub journal: Journal,
    pub environment: RecordingEnvironment,
    pub probe: Arc<ScriptedProbe>,
    pub sink: Arc<MemorySink>,
    pub initialize_calls: Arc<AtomicU32>,
    with_health_checks: bool,
    max_attempts: u32,
}

impl TestHarness {
    /// Harness whose instances have no health checks and whose probe always answers 200
    pub fn new() -> Self {
        let journal = Journal::default();
        Self {
            environment: RecordingEnvironment {
                journal: journal.clone(),
                fail_deployments: false,
                teardowns: Arc::new(AtomicU32::new(0)),
            },
            probe: Arc::new(ScriptedProbe {
                journal: journal.clone(),
                replies: Mutex::new(VecDeque::new()),
                fallback: ProbeReply::Status(200),
                calls: AtomicU32::new(0),
            }),
            journal,
            sink: Arc::new(MemorySink::new()),
            initialize_calls: Arc::new(AtomicU32::new(0)),
            with_health_checks: false,
            max_attempts: 3,
        }
    }

    /// Give every default instance a health-check URL
    pub fn with_health_checks(mut self) -> Self {
        self.with_health_checks = true;
        self
    }

    pub fn with_probe_replies(mut self, replies: Vec<ProbeReply>, fallback: ProbeReply) -> Self {
        self.probe = Arc::new(ScriptedProbe {
            journal: self.journal.clone(),
            replies: Mutex::new(replies.into()),
            fallback,
            calls: AtomicU32::new(0),
        });
        self
    }

    pub fn with_failing_deployments(mut self) -> Self {
        self.environment.fail_deployments = true;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn initialize_calls(&self) -> u32 {
        self.initialize_calls.load(Ordering::SeqCst)
    }

    pub fn builder(&self) -> ScenarioConfigurationBuilder {
        let environment = self.environment.clone();
        let with_health_checks = self.with_health_checks;
        let journal = self.journal.clone();
        let initialize_calls = self.initialize_calls.clone();

        ScenarioConfiguration::builder()
            .environment_factory(move || {
                let environment = environment.clone();
                async move { Ok::<_, ScenarioError>(Box::new(environment) as Box<dyn EnvironmentController>) }
            })
            .connector_instance_factory(move |hostname: &str| {
                Box::new(TestFixtures::connector_instance(hostname, with_health_checks)) as BoxedInstance
            })
            .connector_controller_factory(move |params: ConnectionParams| {
                Box::new(JournalingConnector {
                    params,
                    journal: journal.clone(),
                    initialize_calls: initialize_calls.clone(),
                }) as BoxedConnectorController
            })
            .health_probe(self.probe.clone())
            .retry_policy(RetryPolicy::fixed(Duration::from_millis(1), self.max_attempts))
            .logger(Logger::with_sink(self.sink.clone()))
    }

    pub fn identity_management(&self) -> IdentityManagement {
        let with_health_checks = self.with_health_checks;
        IdentityManagement::new(
            move |deployment_name: &str, credentials: &Credentials| {
                let instance = InstanceDescriptor::new(deployment_name).with_credentials(credentials.clone());
                let instance = if with_health_checks {
                    instance
                        .with_health_check(&TestFixtures::health_url(deployment_name))
                        .expect("Valid fixture URL")
                } else {
                    instance
                };
                Box::new(instance) as BoxedInstance
            },
            || Box::new(RecordingIdentityProvider) as BoxedIdentityProviderController,
        )
    }

    pub async fn initiate(&self) -> ScenarioController {
        self.initiate_with(self.builder()).await
    }

    pub async fn initiate_with(&self, builder: ScenarioConfigurationBuilder) -> ScenarioController {
        let configuration = builder.build().expect("Valid test configuration");
        match ScenarioController::initiate(configuration).await {
            Ok(controller) => controller,
            Err(e) => panic!("initiate failed: {e}"),
        }
    }
}
