/// The status `reason` the API server uses when a create collides with an existing object.
const REASON_ALREADY_EXISTS: &str = "AlreadyExists";

/// Inspects the `Status` object the API server sends back with a failed request.
pub trait ApiStatus {
    /// The machine readable `reason` of the failed call, e.g. `AlreadyExists` or `Conflict`.
    fn reason(&self) -> Option<&str>;

    /// A create was rejected because an object with the same identity exists. A `409` alone is
    /// not enough, apply conflicts share the code.
    fn is_already_exists(&self) -> bool {
        self.reason() == Some(REASON_ALREADY_EXISTS)
    }
}

impl ApiStatus for kube::Error {
    fn reason(&self) -> Option<&str> {
        match self {
            kube::Error::Api(response) => Some(response.reason.as_str()),
            _ => None,
        }
    }
}
