use super::common_labels;
use crate::constants::{
    CLUSTER_ROLE_BINDING_NAME, CLUSTER_ROLE_NAME, RBAC_RESOURCES, SERVICE_ACCOUNT_NAME,
};
use k8s_openapi::api::core::v1::ServiceAccount;
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding, PolicyRule, RoleRef, Subject};
use kube::api::ObjectMeta;

/// Defines the service account the agent and Redis pods run as.
pub fn agent_service_account(namespace: &str) -> ServiceAccount {
    ServiceAccount {
        metadata: ObjectMeta {
            name: Some(SERVICE_ACCOUNT_NAME.to_string()),
            namespace: Some(namespace.to_string()),
            labels: Some(common_labels()),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Defines the read-only cluster role for the agent.
pub fn agent_cluster_role() -> ClusterRole {
    ClusterRole {
        metadata: ObjectMeta {
            name: Some(CLUSTER_ROLE_NAME.to_string()),
            labels: Some(common_labels()),
            ..Default::default()
        },
        rules: Some(vec![PolicyRule {
            api_groups: Some(
                vec!["", "extensions", "apps"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
            resources: Some(RBAC_RESOURCES.iter().map(|s| s.to_string()).collect()),
            verbs: vec!["list", "get", "watch"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ..Default::default()
        }]),
        ..Default::default()
    }
}

/// Binds the agent cluster role to the agent service account in `namespace`.
pub fn agent_cluster_role_binding(namespace: &str) -> ClusterRoleBinding {
    ClusterRoleBinding {
        metadata: ObjectMeta {
            name: Some(CLUSTER_ROLE_BINDING_NAME.to_string()),
            labels: Some(common_labels()),
            ..Default::default()
        },
        role_ref: RoleRef {
            kind: "ClusterRole".to_string(),
            name: CLUSTER_ROLE_NAME.to_string(),
            api_group: "rbac.authorization.k8s.io".to_string(),
        },
        subjects: Some(vec![Subject {
            kind: "ServiceAccount".to_string(),
            name: SERVICE_ACCOUNT_NAME.to_string(),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        }]),
    }
}
