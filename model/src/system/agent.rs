use super::{app_labels, app_selector, common_labels, resource_list};
use crate::config::DeployConfig;
use crate::constants::{
    AGENT_CAPABILITIES, DAEMON_SET_NAME, ENV_INTERFACE_PREFIX, ENV_OWN_NAMESPACE,
    ENV_OWN_NODE_NAME, ENV_OWN_POD_NAME, ENV_STAGE, PROCFS_HOST_PATH, PROCFS_MOUNT_PATH,
    PROCFS_VOLUME_NAME, SERVICE_ACCOUNT_NAME, SYSFS_HOST_PATH, SYSFS_MOUNT_PATH,
    SYSFS_VOLUME_NAME,
};
use k8s_openapi::api::apps::v1::{DaemonSet, DaemonSetSpec};
use k8s_openapi::api::core::v1::{
    Capabilities, Container, EnvVar, EnvVarSource, HostPathVolumeSource, ObjectFieldSelector,
    PodSpec, PodTemplateSpec, ResourceRequirements, SecurityContext, Volume, VolumeMount,
};
use kube::api::ObjectMeta;

/// Defines the podloxx agent DaemonSet. The agent runs on the host network with read-only access
/// to the host's `/proc` (network namespaces of other processes) and `/sys` (eBPF tracepoints).
pub fn agent_daemon_set(config: &DeployConfig) -> DaemonSet {
    DaemonSet {
        metadata: ObjectMeta {
            name: Some(DAEMON_SET_NAME.to_string()),
            namespace: Some(config.namespace.clone()),
            labels: Some(common_labels()),
            ..Default::default()
        },
        spec: Some(DaemonSetSpec {
            selector: app_selector(DAEMON_SET_NAME),
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(app_labels(DAEMON_SET_NAME)),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![agent_container(config)],
                    dns_policy: Some("ClusterFirstWithHostNet".to_string()),
                    host_network: Some(true),
                    service_account_name: Some(SERVICE_ACCOUNT_NAME.to_string()),
                    termination_grace_period_seconds: Some(0),
                    volumes: Some(vec![
                        host_path_volume(PROCFS_VOLUME_NAME, PROCFS_HOST_PATH),
                        host_path_volume(SYSFS_VOLUME_NAME, SYSFS_HOST_PATH),
                    ]),
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn agent_container(config: &DeployConfig) -> Container {
    Container {
        name: DAEMON_SET_NAME.to_string(),
        image: Some(config.agent_image.clone()),
        image_pull_policy: Some("Always".to_string()),
        env: Some(vec![
            literal_env(ENV_STAGE, &config.stage),
            literal_env(ENV_INTERFACE_PREFIX, &config.interface_prefix),
            field_ref_env(ENV_OWN_NODE_NAME, "spec.nodeName"),
            field_ref_env(ENV_OWN_POD_NAME, "metadata.name"),
            field_ref_env(ENV_OWN_NAMESPACE, "metadata.namespace"),
        ]),
        resources: Some(ResourceRequirements {
            limits: Some(resource_list(&[
                ("cpu", "1000m"),
                ("memory", "512Mi"),
                ("ephemeral-storage", "100Mi"),
            ])),
            requests: Some(resource_list(&[
                ("cpu", "500m"),
                ("memory", "128Mi"),
                ("ephemeral-storage", "10Mi"),
            ])),
            ..Default::default()
        }),
        security_context: Some(SecurityContext {
            capabilities: Some(Capabilities {
                add: Some(AGENT_CAPABILITIES.iter().map(|s| s.to_string()).collect()),
                drop: Some(vec!["ALL".to_string()]),
            }),
            ..Default::default()
        }),
        volume_mounts: Some(vec![
            read_only_mount(PROCFS_VOLUME_NAME, PROCFS_MOUNT_PATH),
            read_only_mount(SYSFS_VOLUME_NAME, SYSFS_MOUNT_PATH),
        ]),
        ..Default::default()
    }
}

pub(super) fn literal_env(name: &str, value: &str) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value: Some(value.to_string()),
        value_from: None,
    }
}

/// An environment variable that the kubelet resolves from the pod's own object at start.
fn field_ref_env(name: &str, field_path: &str) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value: None,
        value_from: Some(EnvVarSource {
            field_ref: Some(ObjectFieldSelector {
                api_version: Some("v1".to_string()),
                field_path: field_path.to_string(),
            }),
            ..Default::default()
        }),
    }
}

fn host_path_volume(name: &str, path: &str) -> Volume {
    Volume {
        name: name.to_string(),
        host_path: Some(HostPathVolumeSource {
            path: path.to_string(),
            type_: None,
        }),
        ..Default::default()
    }
}

fn read_only_mount(name: &str, mount_path: &str) -> VolumeMount {
    VolumeMount {
        name: name.to_string(),
        mount_path: mount_path.to_string(),
        read_only: Some(true),
        ..Default::default()
    }
}
