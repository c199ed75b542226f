// Errors raised by the VI/JSON client

#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// vim25 fault, e.g. `InvalidLogin`, `NoPermission`, `ManagedObjectNotFound`.
    #[error("{fault}: {message}")]
    Fault { fault: String, message: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("login response carried no session id")]
    MissingSessionId,

    #[error("endpoint url cannot carry a path: {0}")]
    InvalidBaseUrl(String),
}

impl EndpointError {
    /// Rejected credentials or an expired session.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            EndpointError::Status { status, .. } => *status == 401,
            EndpointError::Fault { fault, .. } => {
                matches!(fault.as_str(), "InvalidLogin" | "NotAuthenticated")
            }
            _ => false,
        }
    }
}
