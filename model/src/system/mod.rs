/// Encapsulates podloxx related K8S object definitions
mod agent;
mod rbac;
mod redis;

pub use agent::agent_daemon_set;
pub use rbac::{agent_cluster_role, agent_cluster_role_binding, agent_service_account};
pub use redis::redis_deployment;

use crate::config::DeployConfig;
use crate::constants::{APP_MANAGED_BY, APP_PART_OF, DEPLOYER, LABEL_APP, PODLOXX};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use maplit::btreemap;
use std::collections::BTreeMap;

/// Renders every object that `deploy` submits as a multi-document YAML stream, in the order they
/// would be sent to the cluster.
pub fn manifest(config: &DeployConfig) -> serde_yaml::Result<String> {
    let documents = vec![
        serde_yaml::to_string(&agent_service_account(&config.namespace))?,
        serde_yaml::to_string(&agent_cluster_role())?,
        serde_yaml::to_string(&agent_cluster_role_binding(&config.namespace))?,
        serde_yaml::to_string(&redis_deployment(config))?,
        serde_yaml::to_string(&agent_daemon_set(config))?,
    ];
    Ok(documents.concat())
}

/// Labels carried by the metadata of every podloxx object.
pub(crate) fn common_labels() -> BTreeMap<String, String> {
    btreemap! {
        APP_PART_OF.to_string() => PODLOXX.to_string(),
        APP_MANAGED_BY.to_string() => DEPLOYER.to_string(),
    }
}

/// The `app=<name>` label that ties a workload's selector to its pod template.
pub(crate) fn app_labels(name: &str) -> BTreeMap<String, String> {
    btreemap! { LABEL_APP.to_string() => name.to_string() }
}

pub(crate) fn app_selector(name: &str) -> LabelSelector {
    LabelSelector {
        match_labels: Some(app_labels(name)),
        ..Default::default()
    }
}

/// Builds a resource list from `(resource, quantity)` pairs, e.g. `("cpu", "100m")`.
pub(crate) fn resource_list(values: &[(&str, &str)]) -> BTreeMap<String, Quantity> {
    values
        .iter()
        .map(|(name, quantity)| (name.to_string(), Quantity(quantity.to_string())))
        .collect()
}
