use crate::client::ClientError;
use std::time::Duration;

/// Error types for location operations
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Project {name} does not exist and namespace creation is disabled")]
    NamespaceNotFound { name: String },

    #[error("Timed out after {waited:?} waiting for {resource}: {diagnostic}")]
    ConvergenceTimeout {
        resource: String,
        diagnostic: String,
        waited: Duration,
    },

    #[error("Transient transport error: {0}")]
    TransientTransport(#[source] ClientError),

    #[error(transparent)]
    Client(ClientError),

    #[error("Invalid deployment unit: {0}")]
    InvalidSpec(String),
}

impl LocationError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, LocationError::ConvergenceTimeout { .. })
    }
}

impl From<ClientError> for LocationError {
    fn from(err: ClientError) -> Self {
        if err.is_transient() {
            LocationError::TransientTransport(err)
        } else {
            LocationError::Client(err)
        }
    }
}
