use crate::openshift::{DeploymentConfig, Project};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Namespace, Secret, Service};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API error {code} ({reason}): {message}")]
    Api {
        code: u16,
        reason: String,
        message: String,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Client error: {0}")]
    Other(String),
}

impl ClientError {
    /// Connection failures, server errors and throttling may clear up on their own.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Api { code, .. } => *code >= 500 || *code == 429,
            ClientError::Decode(_) | ClientError::Other(_) => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { code: 404, .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ClientError::Api { code: 409, .. })
    }
}

impl From<kube::Error> for ClientError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(resp) => ClientError::Api {
                code: resp.code,
                reason: resp.reason,
                message: resp.message,
            },
            kube::Error::HyperError(e) => ClientError::Transport(e.to_string()),
            kube::Error::Service(e) => ClientError::Transport(e.to_string()),
            kube::Error::ReadEvents(e) => ClientError::Transport(e.to_string()),
            kube::Error::HttpError(e) => ClientError::Transport(e.to_string()),
            kube::Error::SerdeError(e) => ClientError::Decode(e.to_string()),
            other => ClientError::Other(other.to_string()),
        }
    }
}

/// Read/write access to projects, deployment configs, services and secrets.
///
/// Every call is a single request. Lookups return `Ok(None)` when the object
/// does not exist, and deleting a missing object succeeds, so callers can tell
/// "not there" apart from "could not ask".
#[async_trait]
pub trait ControlPlaneClient: Send + Sync {
    async fn get_project(&self, name: &str) -> Result<Option<Project>, ClientError>;

    async fn create_project(&self, name: &str) -> Result<Project, ClientError>;

    async fn delete_project(&self, name: &str) -> Result<(), ClientError>;

    async fn get_namespace(&self, name: &str) -> Result<Option<Namespace>, ClientError>;

    async fn get_deployment_config(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<DeploymentConfig>, ClientError>;

    async fn create_deployment_config(
        &self,
        namespace: &str,
        deployment: &DeploymentConfig,
    ) -> Result<DeploymentConfig, ClientError>;

    async fn delete_deployment_config(&self, namespace: &str, name: &str)
        -> Result<(), ClientError>;

    async fn list_deployment_configs(
        &self,
        namespace: &str,
    ) -> Result<Vec<DeploymentConfig>, ClientError>;

    async fn list_services(&self, namespace: &str) -> Result<Vec<Service>, ClientError>;

    async fn list_secrets(&self, namespace: &str) -> Result<Vec<Secret>, ClientError>;
}

/// The single client handle a location owns, plus the lock that serializes
/// project create/delete sequences issued through it.
pub struct SharedClient {
    inner: Arc<dyn ControlPlaneClient>,
    namespace_lock: Mutex<()>,
}

impl SharedClient {
    pub fn new(inner: Arc<dyn ControlPlaneClient>) -> Self {
        Self {
            inner,
            namespace_lock: Mutex::new(()),
        }
    }

    pub fn api(&self) -> &dyn ControlPlaneClient {
        self.inner.as_ref()
    }

    /// Held for the whole read-check-mutate-poll sequence of a project.
    pub async fn lock_namespaces(&self) -> MutexGuard<'_, ()> {
        self.namespace_lock.lock().await
    }
}
