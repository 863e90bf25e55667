use super::{error, Result};
use crate::clients::{ClusterClient, KubeClusterClient};
use crate::config::DeployConfig;
use futures::join;
use log::error;
use snafu::ResultExt;
use std::path::Path;

/// # Provisioner
///
/// The provisioner puts everything the podloxx agent needs into a cluster:
/// - the `ServiceAccount`, `ClusterRole` and `ClusterRoleBinding` giving the agent read access,
/// - the Redis `Deployment` the agents report into,
/// - the privileged agent `DaemonSet`.
///
/// RBAC objects are created once and left alone if they exist. The workloads are submitted with
/// a forced server-side apply, so every run converges them on the desired spec. Nothing is ever
/// deleted and nothing waits for the workloads to become ready.
///
/// The provisioner talks to the cluster through a [`ClusterClient`], which defaults to
/// [`KubeClusterClient`].
pub struct Provisioner<C = KubeClusterClient> {
    pub(super) client: C,
    pub(super) config: DeployConfig,
}

impl Provisioner<KubeClusterClient> {
    /// Create a `Provisioner` using the default `kube::Client`.
    pub async fn new(config: DeployConfig) -> Result<Self> {
        let client = KubeClusterClient::new()
            .await
            .context(error::ClientSnafu)?;
        Ok(Self::new_with_client(client, config))
    }

    /// Create a `Provisioner` from the path to a kubeconfig file.
    pub async fn new_from_kubeconfig_path(
        kubeconfig_path: &Path,
        config: DeployConfig,
    ) -> Result<Self> {
        let client = KubeClusterClient::new_from_kubeconfig_path(kubeconfig_path)
            .await
            .context(error::ClientSnafu)?;
        Ok(Self::new_with_client(client, config))
    }
}

impl<C> Provisioner<C>
where
    C: ClusterClient,
{
    pub fn new_with_client(client: C, config: DeployConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    /// Provision RBAC, Redis and the agent `DaemonSet`. The three target disjoint objects, so they
    /// run concurrently and each runs to completion. If more than one fails, the first error (in
    /// the order RBAC, Redis, `DaemonSet`) is returned and the others are logged.
    pub async fn deploy(&self) -> Result<()> {
        let (rbac, redis, daemon_set) =
            join!(self.add_rbac(), self.add_redis(), self.add_daemon_set());

        let mut errors = [rbac, redis.map(drop), daemon_set.map(drop)]
            .into_iter()
            .filter_map(std::result::Result::err);
        match errors.next() {
            None => Ok(()),
            Some(first) => {
                for other in errors {
                    error!("{}", other);
                }
                Err(first)
            }
        }
    }
}
