use crate::client::{ClientRegistry, ControlPlaneClient, SharedClient};
use crate::config::LocationConfig;
use crate::errors::LocationError;
use crate::location::base::Location;
use crate::location::{deployment, namespace};
use crate::models::DeploymentUnit;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Namespace;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

/// A `Location` that runs workloads as deployment configs inside OpenShift projects.
pub struct OpenShiftLocation {
    config: LocationConfig,
    registry: Option<Arc<dyn ClientRegistry>>,
    client: OnceCell<SharedClient>,
}

impl OpenShiftLocation {
    pub fn new(config: LocationConfig, registry: Arc<dyn ClientRegistry>) -> Self {
        Self {
            config,
            registry: Some(registry),
            client: OnceCell::new(),
        }
    }

    /// A location without a registry; the first client lookup fails.
    pub fn unconfigured(config: LocationConfig) -> Self {
        Self {
            config,
            registry: None,
            client: OnceCell::new(),
        }
    }

    /// A location bound to an already-built client.
    pub fn with_client(config: LocationConfig, client: Arc<dyn ControlPlaneClient>) -> Self {
        Self {
            config,
            registry: None,
            client: OnceCell::from(SharedClient::new(client)),
        }
    }

    pub fn config(&self) -> &LocationConfig {
        &self.config
    }
}

#[async_trait]
impl Location for OpenShiftLocation {
    async fn get_client(&self) -> Result<&SharedClient, LocationError> {
        self.client
            .get_or_try_init(|| async {
                let registry = self.registry.as_ref().ok_or_else(|| {
                    LocationError::Configuration("no client registry configured".to_string())
                })?;
                let client = registry.client(&self.config).await?;
                info!("[OpenShift] Client initialized");
                Ok::<_, LocationError>(SharedClient::new(client))
            })
            .await
    }

    async fn ensure_namespace(
        &self,
        name: &str,
        create: bool,
    ) -> Result<Namespace, LocationError> {
        let client = self.get_client().await?;
        namespace::ensure_namespace(client, name, create, &self.config.poll).await
    }

    async fn delete_empty_namespace(&self, name: &str) -> Result<(), LocationError> {
        let client = self.get_client().await?;
        namespace::delete_empty_namespace(client, name, &self.config.poll).await
    }

    async fn is_namespace_empty(&self, namespace: &str) -> Result<bool, LocationError> {
        let client = self.get_client().await?;
        namespace::is_namespace_empty(client.api(), namespace).await
    }

    async fn deploy(&self, namespace: &str, unit: &DeploymentUnit) -> Result<(), LocationError> {
        let client = self.get_client().await?;
        let poll = unit.poll.unwrap_or(self.config.poll);
        deployment::deploy(client.api(), namespace, unit, &poll).await
    }

    async fn undeploy(&self, namespace: &str, deployment: &str) -> Result<(), LocationError> {
        let client = self.get_client().await?;
        deployment::undeploy(client.api(), namespace, deployment, &self.config.poll).await
    }
}
