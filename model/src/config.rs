use crate::constants::{DAEMON_SET_IMAGE, NAMESPACE, REDIS_IMAGE};
use std::time::Duration;

/// The default bound on a single Kubernetes API call.
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the podloxx objects depend on that is not a fixed constant. The values that the
/// agent reads at runtime (`stage` and `interface_prefix`) are passed in explicitly so that
/// nothing in this library reads the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    /// The namespace that the service account, DaemonSet and Redis Deployment live in. This is
    /// used both in object metadata and for the namespaced API calls.
    pub namespace: String,
    /// Image uri of the podloxx agent.
    pub agent_image: String,
    /// Image uri of the Redis store.
    pub redis_image: String,
    /// Copied verbatim into the `STAGE` environment variable of both containers.
    pub stage: String,
    /// Copied verbatim into the `INTERFACE_PREFIX` environment variable of the agent.
    pub interface_prefix: String,
    /// Upper bound for each individual API call.
    pub api_timeout: Duration,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            namespace: NAMESPACE.to_string(),
            agent_image: DAEMON_SET_IMAGE.to_string(),
            redis_image: REDIS_IMAGE.to_string(),
            stage: String::new(),
            interface_prefix: String::new(),
            api_timeout: DEFAULT_API_TIMEOUT,
        }
    }
}
