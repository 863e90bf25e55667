/// Helper macro to avoid retyping the base name of the system when creating further string
/// constants from it. When given no parameters, this returns the base name. When given a string
/// literal parameter it adds `-parameter` to the end.
macro_rules! podloxx {
    () => {
        "podloxx"
    };
    ($s:literal) => {
        concat!(podloxx!(), "-", $s)
    };
}

// System identifiers
pub const PODLOXX: &str = podloxx!();
pub const NAMESPACE: &str = "default";
pub const DEPLOYER: &str = podloxx!("deploy");

// Component names
pub const SERVICE_ACCOUNT_NAME: &str = podloxx!("service-account-app");
pub const CLUSTER_ROLE_NAME: &str = podloxx!("cluster-role-app");
pub const CLUSTER_ROLE_BINDING_NAME: &str = podloxx!("cluster-role-binding-app");
pub const DAEMON_SET_NAME: &str = podloxx!();
pub const REDIS_NAME: &str = podloxx!("redis");

// Images
pub const DAEMON_SET_IMAGE: &str = "ghcr.io/mogenius/podloxx:latest";
pub const REDIS_IMAGE: &str = "redis:latest";

/// The resource kinds the agent is allowed to `list`, `get` and `watch`.
pub const RBAC_RESOURCES: &[&str] = &[
    "pods",
    "services",
    "endpoints",
    "namespaces",
    "nodes",
    "deployments",
    "replicasets",
    "daemonsets",
    "statefulsets",
];

// Host volumes
pub const PROCFS_VOLUME_NAME: &str = "proc";
pub const PROCFS_HOST_PATH: &str = "/proc";
pub const PROCFS_MOUNT_PATH: &str = "/hostproc";
pub const SYSFS_VOLUME_NAME: &str = "sys";
pub const SYSFS_HOST_PATH: &str = "/sys";
pub const SYSFS_MOUNT_PATH: &str = "/sys";

// Environment variables
pub const ENV_STAGE: &str = "STAGE";
pub const ENV_INTERFACE_PREFIX: &str = "INTERFACE_PREFIX";
pub const ENV_OWN_NODE_NAME: &str = "OWN_NODE_NAME";
pub const ENV_OWN_POD_NAME: &str = "OWN_POD_NAME";
pub const ENV_OWN_NAMESPACE: &str = "OWN_NAMESPACE";

// Label keys
pub const LABEL_APP: &str = "app";

// Standard tags https://kubernetes.io/docs/concepts/overview/working-with-objects/common-labels/
pub const APP_PART_OF: &str = "app.kubernetes.io/part-of";
pub const APP_MANAGED_BY: &str = "app.kubernetes.io/managed-by";

/// Linux capabilities added back to the agent container after dropping `ALL`. The agent enters
/// host network namespaces and installs eBPF tracepoints.
pub const AGENT_CAPABILITIES: &[&str] = &[
    "NET_RAW",
    "NET_ADMIN",
    "SYS_ADMIN",
    "SYS_PTRACE",
    "DAC_OVERRIDE",
    "SYS_RESOURCE",
];

#[test]
fn podloxx_constants_macro_test() {
    assert_eq!("podloxx", podloxx!());
    assert_eq!("podloxx-redis", REDIS_NAME);
    assert_eq!("podloxx-foo", podloxx!("foo"));
}
