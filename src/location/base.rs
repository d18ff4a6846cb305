use crate::client::SharedClient;
use crate::errors::LocationError;
use crate::models::DeploymentUnit;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Namespace;

/// A target control plane that can host one namespace holding one deployment.
#[async_trait]
pub trait Location: Send + Sync {
    /// The client this location talks through, resolved on first use.
    async fn get_client(&self) -> Result<&SharedClient, LocationError>;

    async fn ensure_namespace(&self, name: &str, create: bool)
        -> Result<Namespace, LocationError>;

    /// Best-effort: a namespace that fails to disappear in time is logged, not an error.
    async fn delete_empty_namespace(&self, name: &str) -> Result<(), LocationError>;

    async fn is_namespace_empty(&self, namespace: &str) -> Result<bool, LocationError>;

    async fn deploy(&self, namespace: &str, unit: &DeploymentUnit) -> Result<(), LocationError>;

    async fn undeploy(&self, namespace: &str, deployment: &str) -> Result<(), LocationError>;
}
