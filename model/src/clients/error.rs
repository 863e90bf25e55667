use crate::clients::ApiStatus;
use snafu::Snafu;

/// The `Result` type returned by `clients`.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type returned by `clients`.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Unable to read kubeconfig: {}", source))]
    ConfigRead {
        source: kube::config::KubeconfigError,
    },

    #[snafu(display("Unable to create client: {}", source))]
    ClientCreateKubeconfig {
        source: kube::config::KubeconfigError,
    },

    #[snafu(display("Error initializing the Kubernetes client: {}", source))]
    Initialization { source: kube::Error },

    #[snafu(display("Unable to {} {} '{}': {}", method, what, name, source))]
    KubeApiCall {
        /// The API verb, e.g. 'create' or 'apply'.
        method: String,
        /// The kind of object, e.g. 'service account'.
        what: String,
        /// The name of the k8s object.
        name: String,
        /// The error from kube-rs.
        source: kube::Error,
    },
}

impl Error {
    fn kube_error(&self) -> Option<&kube::Error> {
        match self {
            Error::KubeApiCall { source, .. } | Error::Initialization { source } => Some(source),
            _ => None,
        }
    }
}

impl ApiStatus for Error {
    fn reason(&self) -> Option<&str> {
        self.kube_error().and_then(|e| e.reason())
    }
}

/// Turns an "already exists" error into `Ok(None)`; any other error is kept.
pub trait AllowAlreadyExists<T> {
    fn allow_already_exists(self) -> Result<Option<T>>;
}

impl<T> AllowAlreadyExists<T> for Result<T> {
    fn allow_already_exists(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_already_exists() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
