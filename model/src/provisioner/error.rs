use snafu::Snafu;
use std::time::Duration;

pub type Result<T> = std::result::Result<T, Error>;

/// The error type for `Provisioner`
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum Error {
    #[snafu(display("Unable to apply {}: {}", what, source))]
    Apply {
        what: String,
        source: crate::clients::Error,
    },

    #[snafu(display("Unable to create client: {}", source))]
    Client { source: crate::clients::Error },

    #[snafu(display("Error creating {}: {}", what, source))]
    Create {
        what: String,
        source: crate::clients::Error,
    },

    #[snafu(display("Timed out after {:?} waiting to {}", timeout, action))]
    Timeout {
        action: String,
        timeout: Duration,
        source: tokio::time::error::Elapsed,
    },
}

impl Error {
    /// The client error behind a failed create or apply, if any.
    pub fn client_error(&self) -> Option<&crate::clients::Error> {
        match self {
            Error::Apply { source, .. }
            | Error::Client { source }
            | Error::Create { source, .. } => Some(source),
            Error::Timeout { .. } => None,
        }
    }
}
