use super::agent::literal_env;
use super::{app_labels, app_selector, common_labels, resource_list};
use crate::config::DeployConfig;
use crate::constants::{ENV_STAGE, REDIS_NAME, SERVICE_ACCOUNT_NAME};
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec, ResourceRequirements};
use kube::api::ObjectMeta;

/// Defines the single replica Redis deployment the agents report into.
pub fn redis_deployment(config: &DeployConfig) -> Deployment {
    Deployment {
        metadata: ObjectMeta {
            name: Some(REDIS_NAME.to_string()),
            namespace: Some(config.namespace.clone()),
            labels: Some(common_labels()),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(1),
            selector: app_selector(REDIS_NAME),
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(app_labels(REDIS_NAME)),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: REDIS_NAME.to_string(),
                        image: Some(config.redis_image.clone()),
                        env: Some(vec![literal_env(ENV_STAGE, &config.stage)]),
                        resources: Some(ResourceRequirements {
                            limits: Some(resource_list(&[
                                ("cpu", "300m"),
                                ("memory", "256Mi"),
                                ("ephemeral-storage", "100Mi"),
                            ])),
                            requests: Some(resource_list(&[
                                ("cpu", "100m"),
                                ("memory", "128Mi"),
                                ("ephemeral-storage", "10Mi"),
                            ])),
                            ..Default::default()
                        }),
                        ..Default::default()
                    }],
                    service_account_name: Some(SERVICE_ACCOUNT_NAME.to_string()),
                    termination_grace_period_seconds: Some(0),
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}
