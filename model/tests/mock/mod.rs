/*!

A mock implementation of [`ClusterClient`] so that provisioning can be tested without Kubernetes.
`MockCluster` keeps the objects it receives in memory, answers a second create of the same object
with `AlreadyExists` the way the API server does, and replaces objects on apply.

!*/

#![allow(dead_code)]

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment};
use k8s_openapi::api::core::v1::ServiceAccount;
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding};
use kube::core::ErrorResponse;
use kube::ResourceExt;
use podloxx_model::clients::{ClusterClient, Error, Result};
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

/// Objects are keyed by `(namespace, name)`; cluster scoped objects use an empty namespace.
type Key = (String, String);

#[derive(Debug, Default, Clone)]
pub struct ClusterState {
    pub service_accounts: BTreeMap<Key, ServiceAccount>,
    pub cluster_roles: BTreeMap<Key, ClusterRole>,
    pub cluster_role_bindings: BTreeMap<Key, ClusterRoleBinding>,
    pub daemon_sets: BTreeMap<Key, DaemonSet>,
    pub deployments: BTreeMap<Key, Deployment>,
    /// `(kind, field manager)` of every apply call, in order.
    pub applies: Vec<(String, String)>,
    /// Number of create calls that resulted in a new object.
    pub created: usize,
}

/// A failure the mock returns instead of doing the work, for the given kind of object.
#[derive(Debug, Clone)]
pub struct Failure {
    pub what: &'static str,
    pub reason: &'static str,
    pub code: u16,
}

#[derive(Default)]
pub struct MockCluster {
    state: Mutex<ClusterState>,
    failures: Vec<Failure>,
    delay: Option<Duration>,
}

impl MockCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, what: &'static str, reason: &'static str, code: u16) -> Self {
        self.failures.push(Failure { what, reason, code });
        self
    }

    /// Every call sleeps for `delay` before answering.
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn state(&self) -> ClusterState {
        self.state.lock().unwrap().clone()
    }

    async fn call<T>(&self, method: &str, what: &str, object: &T) -> Result<()>
    where
        T: ResourceExt,
    {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.failures.iter().find(|f| f.what == what) {
            Some(failure) => Err(api_error(
                method,
                what,
                &object.name_any(),
                failure.reason,
                failure.code,
            )),
            None => Ok(()),
        }
    }
}

pub fn api_error(method: &str, what: &str, name: &str, reason: &str, code: u16) -> Error {
    Error::KubeApiCall {
        method: method.to_string(),
        what: what.to_string(),
        name: name.to_string(),
        source: kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: format!("{} \"{}\": {}", what, name, reason),
            reason: reason.to_string(),
            code,
        }),
    }
}

fn key<T: ResourceExt>(object: &T) -> Key {
    (object.namespace().unwrap_or_default(), object.name_any())
}

fn create<T>(
    map: &mut BTreeMap<Key, T>,
    created: &mut usize,
    what: &str,
    object: &T,
) -> Result<T>
where
    T: ResourceExt + Clone,
{
    let key = key(object);
    if map.contains_key(&key) {
        return Err(api_error("create", what, &key.1, "AlreadyExists", 409));
    }
    map.insert(key, object.clone());
    *created += 1;
    Ok(object.clone())
}

#[async_trait]
impl ClusterClient for MockCluster {
    async fn create_service_account(
        &self,
        service_account: &ServiceAccount,
    ) -> Result<ServiceAccount> {
        self.call("create", "service account", service_account).await?;
        let mut state = self.state.lock().unwrap();
        let state = &mut *state;
        create(
            &mut state.service_accounts,
            &mut state.created,
            "service account",
            service_account,
        )
    }

    async fn create_cluster_role(&self, cluster_role: &ClusterRole) -> Result<ClusterRole> {
        self.call("create", "cluster role", cluster_role).await?;
        let mut state = self.state.lock().unwrap();
        let state = &mut *state;
        create(
            &mut state.cluster_roles,
            &mut state.created,
            "cluster role",
            cluster_role,
        )
    }

    async fn create_cluster_role_binding(
        &self,
        binding: &ClusterRoleBinding,
    ) -> Result<ClusterRoleBinding> {
        self.call("create", "cluster role binding", binding).await?;
        let mut state = self.state.lock().unwrap();
        let state = &mut *state;
        create(
            &mut state.cluster_role_bindings,
            &mut state.created,
            "cluster role binding",
            binding,
        )
    }

    async fn apply_daemon_set(
        &self,
        daemon_set: &DaemonSet,
        field_manager: &str,
    ) -> Result<DaemonSet> {
        self.call("apply", "daemonset", daemon_set).await?;
        let mut state = self.state.lock().unwrap();
        state
            .applies
            .push(("DaemonSet".to_string(), field_manager.to_string()));
        state.daemon_sets.insert(key(daemon_set), daemon_set.clone());
        Ok(daemon_set.clone())
    }

    async fn apply_deployment(
        &self,
        deployment: &Deployment,
        field_manager: &str,
    ) -> Result<Deployment> {
        self.call("apply", "deployment", deployment).await?;
        let mut state = self.state.lock().unwrap();
        state
            .applies
            .push(("Deployment".to_string(), field_manager.to_string()));
        state.deployments.insert(key(deployment), deployment.clone());
        Ok(deployment.clone())
    }
}
