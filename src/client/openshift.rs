use crate::client::base::{ClientError, ControlPlaneClient};
use crate::openshift::{DeploymentConfig, Project, ProjectSpec};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Namespace, Secret, Service};
use kube::api::{DeleteParams, ListParams, PostParams};
use kube::{Api, Client};
use tracing::debug;

/// A `ControlPlaneClient` backed by the OpenShift project and apps APIs.
#[derive(Clone)]
pub struct OpenShiftClient {
    client: Client,
}

impl OpenShiftClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn projects(&self) -> Api<Project> {
        Api::all(self.client.clone())
    }

    fn namespaces(&self) -> Api<Namespace> {
        Api::all(self.client.clone())
    }

    fn deployment_configs(&self, namespace: &str) -> Api<DeploymentConfig> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn services(&self, namespace: &str) -> Api<Service> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn secrets(&self, namespace: &str) -> Api<Secret> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

/// Treats a 404 on delete as already done.
fn absent_ok<T>(result: Result<T, kube::Error>) -> Result<(), ClientError> {
    match result.map_err(ClientError::from) {
        Ok(_) => Ok(()),
        Err(e) if e.is_not_found() => Ok(()),
        Err(e) => Err(e),
    }
}

#[async_trait]
impl ControlPlaneClient for OpenShiftClient {
    async fn get_project(&self, name: &str) -> Result<Option<Project>, ClientError> {
        Ok(self.projects().get_opt(name).await?)
    }

    async fn create_project(&self, name: &str) -> Result<Project, ClientError> {
        let project = Project::new(name, ProjectSpec::default());
        debug!("[OpenShift] Creating project {}", name);
        Ok(self
            .projects()
            .create(&PostParams::default(), &project)
            .await?)
    }

    async fn delete_project(&self, name: &str) -> Result<(), ClientError> {
        debug!("[OpenShift] Deleting project {}", name);
        absent_ok(self.projects().delete(name, &DeleteParams::default()).await)
    }

    async fn get_namespace(&self, name: &str) -> Result<Option<Namespace>, ClientError> {
        Ok(self.namespaces().get_opt(name).await?)
    }

    async fn get_deployment_config(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<DeploymentConfig>, ClientError> {
        Ok(self.deployment_configs(namespace).get_opt(name).await?)
    }

    async fn create_deployment_config(
        &self,
        namespace: &str,
        deployment: &DeploymentConfig,
    ) -> Result<DeploymentConfig, ClientError> {
        Ok(self
            .deployment_configs(namespace)
            .create(&PostParams::default(), deployment)
            .await?)
    }

    async fn delete_deployment_config(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClientError> {
        absent_ok(
            self.deployment_configs(namespace)
                .delete(name, &DeleteParams::default())
                .await,
        )
    }

    async fn list_deployment_configs(
        &self,
        namespace: &str,
    ) -> Result<Vec<DeploymentConfig>, ClientError> {
        Ok(self
            .deployment_configs(namespace)
            .list(&ListParams::default())
            .await?
            .items)
    }

    async fn list_services(&self, namespace: &str) -> Result<Vec<Service>, ClientError> {
        Ok(self
            .services(namespace)
            .list(&ListParams::default())
            .await?
            .items)
    }

    async fn list_secrets(&self, namespace: &str) -> Result<Vec<Secret>, ClientError> {
        Ok(self
            .secrets(namespace)
            .list(&ListParams::default())
            .await?
            .items)
    }
}
