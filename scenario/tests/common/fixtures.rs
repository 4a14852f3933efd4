//! Test data shared across suites

use scenario::BoxedInstance;
use shared::{Endpoint, InstanceDescriptor};

pub struct TestFixtures;

impl TestFixtures {
    pub fn username() -> &'static str {
        "u"
    }

    pub fn password() -> &'static str {
        "p"
    }

    pub fn host_a() -> &'static str {
        "host-a"
    }

    pub fn host_b() -> &'static str {
        "host-b"
    }

    pub fn health_url(hostname: &str) -> String {
        format!("https://{hostname}/health")
    }

    /// Connector description as a default factory would produce it
    pub fn connector_instance(hostname: &str, with_health_check: bool) -> InstanceDescriptor {
        let instance = InstanceDescriptor::new(hostname)
            .with_endpoint(Endpoint::new("ids", 8080))
            .with_endpoint(Endpoint::new("api", 443));

        if with_health_check {
            instance
                .with_health_check(&Self::health_url(hostname))
                .expect("Valid fixture URL")
        } else {
            instance
        }
    }

    pub fn broker_instance(with_health_check: bool) -> InstanceDescriptor {
        let instance = InstanceDescriptor::new("broker").with_endpoint(Endpoint::new("broker", 8081));
        if with_health_check {
            instance
                .with_health_check(&Self::health_url("broker"))
                .expect("Valid fixture URL")
        } else {
            instance
        }
    }

    pub fn boxed(instance: InstanceDescriptor) -> BoxedInstance {
        Box::new(instance)
    }
}
