use super::{error, Result};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment};
use k8s_openapi::api::core::v1::ServiceAccount;
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding};
use kube::api::{Patch, PatchParams, PostParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config, ResourceExt};
use snafu::ResultExt;
use std::path::Path;

/// The `ClusterClient` is the interface to the Kubernetes API that podloxx provisioning needs. The
/// purpose of the interface is to allow injection of a mock for testing without the presence of a
/// k8s cluster. In practice you will use [`KubeClusterClient`].
///
/// `create_*` functions map to a plain `POST`; the API server answers with `AlreadyExists` if the
/// object is there. `apply_*` functions map to a forced server-side apply owned by
/// `field_manager`, so repeated calls converge on the submitted object.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    async fn create_service_account(
        &self,
        service_account: &ServiceAccount,
    ) -> Result<ServiceAccount>;

    async fn create_cluster_role(&self, cluster_role: &ClusterRole) -> Result<ClusterRole>;

    async fn create_cluster_role_binding(
        &self,
        binding: &ClusterRoleBinding,
    ) -> Result<ClusterRoleBinding>;

    async fn apply_daemon_set(
        &self,
        daemon_set: &DaemonSet,
        field_manager: &str,
    ) -> Result<DaemonSet>;

    async fn apply_deployment(
        &self,
        deployment: &Deployment,
        field_manager: &str,
    ) -> Result<Deployment>;
}

/// Provides the default [`ClusterClient`] implementation on top of a `kube::Client`. Namespaced
/// objects are sent to the namespace in their own metadata.
#[derive(Clone)]
pub struct KubeClusterClient {
    client: Client,
}

impl KubeClusterClient {
    /// Create a `KubeClusterClient` using the default `kube::Client` (in-cluster variables or
    /// `KUBECONFIG`).
    pub async fn new() -> Result<Self> {
        let client = Client::try_default()
            .await
            .context(error::InitializationSnafu)?;
        Ok(Self::new_from_k8s_client(client))
    }

    /// Create a `KubeClusterClient` from the path to a kubeconfig file.
    pub async fn new_from_kubeconfig_path(kubeconfig_path: &Path) -> Result<Self> {
        let kubeconfig = Kubeconfig::read_from(kubeconfig_path).context(error::ConfigReadSnafu)?;
        let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .context(error::ClientCreateKubeconfigSnafu)?;
        let client = Client::try_from(config).context(error::InitializationSnafu)?;
        Ok(Self::new_from_k8s_client(client))
    }

    pub fn new_from_k8s_client(client: Client) -> Self {
        Self { client }
    }

    /// Creates an api of type `T` in the namespace of `object`
    fn namespaced_api<T>(&self, object: &T) -> Api<T>
    where
        T: kube::Resource<Scope = k8s_openapi::NamespaceResourceScope>,
        <T as kube::Resource>::DynamicType: Default,
    {
        match object.namespace() {
            Some(namespace) => Api::namespaced(self.client.clone(), &namespace),
            None => Api::default_namespaced(self.client.clone()),
        }
    }

    /// Creates a non namespaced api of type `T`
    fn api<T>(&self) -> Api<T>
    where
        T: kube::Resource,
        <T as kube::Resource>::DynamicType: Default,
    {
        Api::all(self.client.clone())
    }
}

#[async_trait]
impl ClusterClient for KubeClusterClient {
    async fn create_service_account(
        &self,
        service_account: &ServiceAccount,
    ) -> Result<ServiceAccount> {
        self.namespaced_api(service_account)
            .create(&PostParams::default(), service_account)
            .await
            .context(error::KubeApiCallSnafu {
                method: "create",
                what: "service account",
                name: service_account.name_any(),
            })
    }

    async fn create_cluster_role(&self, cluster_role: &ClusterRole) -> Result<ClusterRole> {
        self.api()
            .create(&PostParams::default(), cluster_role)
            .await
            .context(error::KubeApiCallSnafu {
                method: "create",
                what: "cluster role",
                name: cluster_role.name_any(),
            })
    }

    async fn create_cluster_role_binding(
        &self,
        binding: &ClusterRoleBinding,
    ) -> Result<ClusterRoleBinding> {
        self.api()
            .create(&PostParams::default(), binding)
            .await
            .context(error::KubeApiCallSnafu {
                method: "create",
                what: "cluster role binding",
                name: binding.name_any(),
            })
    }

    async fn apply_daemon_set(
        &self,
        daemon_set: &DaemonSet,
        field_manager: &str,
    ) -> Result<DaemonSet> {
        let name = daemon_set.name_any();
        self.namespaced_api(daemon_set)
            .patch(
                &name,
                &PatchParams::apply(field_manager).force(),
                &Patch::Apply(daemon_set),
            )
            .await
            .context(error::KubeApiCallSnafu {
                method: "apply",
                what: "daemonset",
                name,
            })
    }

    async fn apply_deployment(
        &self,
        deployment: &Deployment,
        field_manager: &str,
    ) -> Result<Deployment> {
        let name = deployment.name_any();
        self.namespaced_api(deployment)
            .patch(
                &name,
                &PatchParams::apply(field_manager).force(),
                &Patch::Apply(deployment),
            )
            .await
            .context(error::KubeApiCallSnafu {
                method: "apply",
                what: "deployment",
                name,
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::DeployConfig;
    use crate::constants::{DAEMON_SET_NAME, NAMESPACE, REDIS_NAME};
    use crate::system::{
        agent_cluster_role, agent_cluster_role_binding, agent_daemon_set, agent_service_account,
        redis_deployment,
    };
    use hyper::{Body, Request, Response};
    use std::collections::BTreeSet;
    use tokio::task::JoinHandle;
    use tower_test::mock;

    /// What the API server saw of a single request.
    #[derive(Debug)]
    struct Received {
        method: String,
        path: String,
        query: BTreeSet<String>,
        content_type: Option<String>,
    }

    /// A `KubeClusterClient` whose transport answers exactly one request by echoing its body,
    /// and a handle yielding that request.
    fn echo_client() -> (KubeClusterClient, JoinHandle<Received>) {
        let (service, mut handle) = mock::pair::<Request<Body>, Response<Body>>();
        let responder = tokio::spawn(async move {
            let (request, send) = handle.next_request().await.unwrap();
            let received = Received {
                method: request.method().to_string(),
                path: request.uri().path().to_string(),
                query: request
                    .uri()
                    .query()
                    .unwrap_or_default()
                    .split('&')
                    .filter(|param| !param.is_empty())
                    .map(str::to_string)
                    .collect(),
                content_type: request
                    .headers()
                    .get(hyper::header::CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string),
            };
            let body = hyper::body::to_bytes(request.into_body()).await.unwrap();
            send.send_response(Response::builder().body(Body::from(body)).unwrap());
            received
        });
        let client = KubeClusterClient::new_from_k8s_client(Client::new(service, NAMESPACE));
        (client, responder)
    }

    fn param(name: &str, value: &str) -> String {
        format!("{}={}", name, value)
    }

    #[tokio::test]
    async fn daemon_set_apply_is_forced_and_owned_by_its_field_manager() {
        let (client, responder) = echo_client();
        let daemon_set = agent_daemon_set(&DeployConfig::default());
        let applied = client
            .apply_daemon_set(&daemon_set, DAEMON_SET_NAME)
            .await
            .unwrap();
        assert_eq!(applied.name_any(), DAEMON_SET_NAME);

        let received = responder.await.unwrap();
        assert_eq!(received.method, "PATCH");
        assert_eq!(
            received.path,
            "/apis/apps/v1/namespaces/default/daemonsets/podloxx"
        );
        assert!(received.query.contains(&param("force", "true")));
        assert!(received
            .query
            .contains(&param("fieldManager", DAEMON_SET_NAME)));
        assert_eq!(
            received.content_type.as_deref(),
            Some("application/apply-patch+yaml")
        );
    }

    #[tokio::test]
    async fn deployment_apply_uses_the_redis_field_manager_and_object_namespace() {
        let (client, responder) = echo_client();
        let config = DeployConfig {
            namespace: "monitoring".to_string(),
            ..Default::default()
        };
        client
            .apply_deployment(&redis_deployment(&config), REDIS_NAME)
            .await
            .unwrap();

        let received = responder.await.unwrap();
        assert_eq!(received.method, "PATCH");
        assert_eq!(
            received.path,
            "/apis/apps/v1/namespaces/monitoring/deployments/podloxx-redis"
        );
        assert!(received.query.contains(&param("force", "true")));
        assert!(received.query.contains(&param("fieldManager", REDIS_NAME)));
        assert_eq!(
            received.content_type.as_deref(),
            Some("application/apply-patch+yaml")
        );
    }

    #[tokio::test]
    async fn rbac_objects_are_created_with_post() {
        let (client, responder) = echo_client();
        client
            .create_service_account(&agent_service_account(NAMESPACE))
            .await
            .unwrap();
        let received = responder.await.unwrap();
        assert_eq!(received.method, "POST");
        assert_eq!(received.path, "/api/v1/namespaces/default/serviceaccounts");
        assert_eq!(received.content_type.as_deref(), Some("application/json"));

        let (client, responder) = echo_client();
        client
            .create_cluster_role(&agent_cluster_role())
            .await
            .unwrap();
        let received = responder.await.unwrap();
        assert_eq!(received.method, "POST");
        assert_eq!(
            received.path,
            "/apis/rbac.authorization.k8s.io/v1/clusterroles"
        );
        assert!(!received.query.iter().any(|p| p.starts_with("force")));

        let (client, responder) = echo_client();
        client
            .create_cluster_role_binding(&agent_cluster_role_binding(NAMESPACE))
            .await
            .unwrap();
        let received = responder.await.unwrap();
        assert_eq!(received.method, "POST");
        assert_eq!(
            received.path,
            "/apis/rbac.authorization.k8s.io/v1/clusterrolebindings"
        );
    }

    #[tokio::test]
    async fn objects_without_namespace_go_to_the_client_default() {
        let (client, responder) = echo_client();
        let mut service_account = agent_service_account(NAMESPACE);
        service_account.metadata.namespace = None;
        client
            .create_service_account(&service_account)
            .await
            .unwrap();
        let received = responder.await.unwrap();
        assert_eq!(received.path, "/api/v1/namespaces/default/serviceaccounts");
    }
}
