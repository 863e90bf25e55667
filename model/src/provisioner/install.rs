use super::{error, Provisioner, Result};
use crate::clients::{self, AllowAlreadyExists, ClusterClient};
use crate::constants::{DAEMON_SET_NAME, REDIS_NAME};
use crate::system::{
    agent_cluster_role, agent_cluster_role_binding, agent_daemon_set, agent_service_account,
    redis_deployment,
};
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment};
use kube::ResourceExt;
use log::{debug, info};
use snafu::ResultExt;
use std::future::Future;

impl<C> Provisioner<C>
where
    C: ClusterClient,
{
    /// Create the service account, cluster role and cluster role binding. Objects that already
    /// exist are left untouched. All three creates are attempted; the first failure is returned.
    pub async fn add_rbac(&self) -> Result<()> {
        info!("Creating podloxx RBAC ...");
        let service_account = agent_service_account(&self.config.namespace);
        let cluster_role = agent_cluster_role();
        let cluster_role_binding = agent_cluster_role_binding(&self.config.namespace);

        let service_account_result = self
            .create_if_absent(
                "service account",
                self.client.create_service_account(&service_account),
            )
            .await;
        let cluster_role_result = self
            .create_if_absent(
                "cluster role",
                self.client.create_cluster_role(&cluster_role),
            )
            .await;
        let cluster_role_binding_result = self
            .create_if_absent(
                "cluster role binding",
                self.client.create_cluster_role_binding(&cluster_role_binding),
            )
            .await;

        service_account_result?;
        cluster_role_result?;
        cluster_role_binding_result?;
        info!("Created podloxx RBAC.");
        Ok(())
    }

    /// Apply the podloxx agent `DaemonSet`, owned by the `DaemonSet`'s own field manager.
    pub async fn add_daemon_set(&self) -> Result<DaemonSet> {
        info!("Creating podloxx daemonset ...");
        let daemon_set = agent_daemon_set(&self.config);
        let applied = self
            .apply(
                "daemonset",
                self.client.apply_daemon_set(&daemon_set, DAEMON_SET_NAME),
            )
            .await?;
        info!("Created podloxx daemonset '{}'.", applied.name_any());
        Ok(applied)
    }

    /// Apply the Redis `Deployment`, owned by the Redis field manager.
    pub async fn add_redis(&self) -> Result<Deployment> {
        info!("Creating podloxx redis ...");
        let deployment = redis_deployment(&self.config);
        let applied = self
            .apply(
                "redis deployment",
                self.client.apply_deployment(&deployment, REDIS_NAME),
            )
            .await?;
        info!("Created podloxx redis '{}'.", applied.name_any());
        Ok(applied)
    }

    async fn create_if_absent<T, F>(&self, what: &str, call: F) -> Result<()>
    where
        F: Future<Output = clients::Result<T>>,
    {
        let created = tokio::time::timeout(self.config.api_timeout, call)
            .await
            .context(error::TimeoutSnafu {
                action: format!("create {}", what),
                timeout: self.config.api_timeout,
            })?
            .allow_already_exists()
            .context(error::CreateSnafu { what })?;
        match created {
            Some(_) => debug!("Created {}", what),
            None => debug!("The {} already exists", what),
        }
        Ok(())
    }

    async fn apply<T, F>(&self, what: &str, call: F) -> Result<T>
    where
        F: Future<Output = clients::Result<T>>,
    {
        tokio::time::timeout(self.config.api_timeout, call)
            .await
            .context(error::TimeoutSnafu {
                action: format!("apply {}", what),
                timeout: self.config.api_timeout,
            })?
            .context(error::ApplySnafu { what })
    }
}
