mod api_status;
mod cluster_client;
mod error;

pub use api_status::ApiStatus;
pub use cluster_client::{ClusterClient, KubeClusterClient};
pub use error::{AllowAlreadyExists, Error, Result};
