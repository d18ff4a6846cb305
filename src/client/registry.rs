use crate::client::base::ControlPlaneClient;
use crate::client::openshift::OpenShiftClient;
use crate::config::LocationConfig;
use crate::errors::LocationError;
use async_trait::async_trait;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;
use std::sync::Arc;
use tracing::info;

/// Produces the control-plane client a location talks through.
#[async_trait]
pub trait ClientRegistry: Send + Sync {
    async fn client(
        &self,
        config: &LocationConfig,
    ) -> Result<Arc<dyn ControlPlaneClient>, LocationError>;
}

/// Builds an `OpenShiftClient` from a kubeconfig file and context, or from
/// the inferred environment (in-cluster service account or `$KUBECONFIG`).
#[derive(Clone, Default)]
pub struct KubeconfigRegistry;

impl KubeconfigRegistry {
    async fn kube_client(&self, config: &LocationConfig) -> Result<Client, LocationError> {
        let options = KubeConfigOptions {
            context: config.context.clone(),
            ..Default::default()
        };

        let kube_config = match &config.kubeconfig {
            Some(path) => {
                info!("[OpenShift] Using kubeconfig from path: {}", path.display());
                let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                    LocationError::Configuration(format!("Failed to load kubeconfig: {}", e))
                })?;
                kube::Config::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .map_err(|e| {
                        LocationError::Configuration(format!(
                            "Failed to create config from kubeconfig: {}",
                            e
                        ))
                    })?
            }
            None if config.context.is_some() => {
                info!("[OpenShift] Using context: {:?}", config.context);
                kube::Config::from_kubeconfig(&options).await.map_err(|e| {
                    LocationError::Configuration(format!(
                        "Failed to create config with context: {}",
                        e
                    ))
                })?
            }
            None => kube::Config::infer().await.map_err(|e| {
                LocationError::Configuration(format!("Failed to infer cluster config: {}", e))
            })?,
        };

        Client::try_from(kube_config).map_err(|e| {
            LocationError::Configuration(format!("Failed to create OpenShift client: {}", e))
        })
    }
}

#[async_trait]
impl ClientRegistry for KubeconfigRegistry {
    async fn client(
        &self,
        config: &LocationConfig,
    ) -> Result<Arc<dyn ControlPlaneClient>, LocationError> {
        let client = self.kube_client(config).await?;
        Ok(Arc::new(OpenShiftClient::new(client)))
    }
}
