use clap::Parser;
use podloxx_model::constants::{DAEMON_SET_IMAGE, NAMESPACE, REDIS_IMAGE};
use podloxx_model::DeployConfig;
use std::time::Duration;

/// Values that end up in the podloxx objects.
#[derive(Debug, Parser)]
pub(crate) struct ConfigArgs {
    /// The stage the agent runs in. Copied into the `STAGE` variable of the containers.
    #[clap(long = "stage", env = "STAGE")]
    stage: Option<String>,

    /// Prefix of the host interfaces the agent captures. Copied into the `INTERFACE_PREFIX`
    /// variable of the agent container.
    #[clap(long = "interface-prefix", env = "INTERFACE_PREFIX")]
    interface_prefix: Option<String>,

    /// Namespace for the service account, the daemonset and the redis deployment.
    #[clap(long = "namespace", short = 'n', default_value = NAMESPACE)]
    namespace: String,

    /// Image uri of the podloxx agent.
    #[clap(long = "agent-image", default_value = DAEMON_SET_IMAGE)]
    agent_image: String,

    /// Image uri of redis.
    #[clap(long = "redis-image", default_value = REDIS_IMAGE)]
    redis_image: String,
}

impl ConfigArgs {
    pub(crate) fn into_deploy_config(self, api_timeout: Duration) -> DeployConfig {
        DeployConfig {
            namespace: self.namespace,
            agent_image: self.agent_image,
            redis_image: self.redis_image,
            stage: self.stage.unwrap_or_default(),
            interface_prefix: self.interface_prefix.unwrap_or_default(),
            api_timeout,
        }
    }
}
