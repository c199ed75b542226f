// Error taxonomy for a report run; each class maps to its own exit code

use crate::models::ObjectKind;
use crate::vim::EndpointError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or invalid endpoint URL, credentials or config file.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("log in not successful: {0}")]
    Auth(#[source] EndpointError),

    #[error("unable to create {kind} container view: {source}")]
    ScopeCreation {
        kind: ObjectKind,
        #[source]
        source: EndpointError,
    },

    #[error("unable to retrieve {kind} information: {source}")]
    Retrieval {
        kind: ObjectKind,
        #[source]
        source: EndpointError,
    },

    /// Endpoint failure outside a per-kind step (service content, client setup).
    #[error("endpoint error: {0}")]
    Endpoint(#[from] EndpointError),

    #[error("operation cancelled")]
    Cancelled,

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Config(_) => 2,
            Error::Auth(_) => 3,
            Error::ScopeCreation { .. } => 4,
            Error::Retrieval { .. } => 5,
            Error::Cancelled => 130,
            Error::Endpoint(_) | Error::Io(_) => 1,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
