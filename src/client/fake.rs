//! In-memory control plane for tests. Projects, deployment configs and
//! removals converge after a scripted number of reads.

use crate::client::base::{ClientError, ControlPlaneClient};
use crate::models::Phase;
use crate::openshift::{DeploymentConfig, DeploymentConfigStatus, Project, ProjectSpec, ProjectStatus};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Namespace, NamespaceStatus, Secret, Service};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CallCounts {
    pub project_creates: usize,
    pub project_deletes: usize,
    pub project_reads: usize,
    pub deployment_creates: usize,
    pub deployment_deletes: usize,
    pub deployment_reads: usize,
}

struct FakeProject {
    phase: Phase,
    countdown: u32,
}

struct FakeDeployment {
    config: DeploymentConfig,
    countdown: u32,
    deleting: bool,
}

#[derive(Default)]
struct FakeState {
    projects: BTreeMap<String, FakeProject>,
    deployments: BTreeMap<(String, String), FakeDeployment>,
    services: BTreeMap<String, Vec<String>>,
    secrets: BTreeMap<String, Vec<String>>,
    activation_reads: u32,
    removal_reads: u32,
    availability_reads: u32,
    stuck_available: Option<i32>,
    stuck_terminating: bool,
    transient_failures: u32,
    fatal_reads: bool,
    calls: CallCounts,
}

impl FakeState {
    fn check_call(&mut self) -> Result<(), ClientError> {
        if self.fatal_reads {
            return Err(ClientError::Api {
                code: 403,
                reason: "Forbidden".to_string(),
                message: "user cannot get resource".to_string(),
            });
        }
        if self.transient_failures > 0 {
            self.transient_failures -= 1;
            return Err(ClientError::Transport("connection reset by peer".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeControlPlane {
    state: Mutex<FakeState>,
}

impl FakeControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// Reads a new project stays `Requested` before turning `Active`.
    pub fn with_activation_reads(self, reads: u32) -> Self {
        self.lock().activation_reads = reads;
        self
    }

    /// Reads a deleted object stays visible before disappearing.
    pub fn with_removal_reads(self, reads: u32) -> Self {
        self.lock().removal_reads = reads;
        self
    }

    /// Reads a new deployment config reports no status before becoming available.
    pub fn with_availability_reads(self, reads: u32) -> Self {
        self.lock().availability_reads = reads;
        self
    }

    /// Every deployment config reports this available count forever.
    pub fn with_stuck_available(self, available: i32) -> Self {
        self.lock().stuck_available = Some(available);
        self
    }

    /// Deleted projects never finish terminating.
    pub fn with_stuck_terminating(self) -> Self {
        self.lock().stuck_terminating = true;
        self
    }

    /// The next `count` object reads or deletes fail with a connection error.
    pub fn with_transient_failures(self, count: u32) -> Self {
        self.lock().transient_failures = count;
        self
    }

    /// Every object read or delete fails with 403.
    pub fn with_fatal_reads(self) -> Self {
        self.lock().fatal_reads = true;
        self
    }

    pub fn with_project(self, name: &str, phase: Phase) -> Self {
        let countdown = match phase {
            Phase::Terminating => self.lock().removal_reads,
            _ => self.lock().activation_reads,
        };
        self.lock()
            .projects
            .insert(name.to_string(), FakeProject { phase, countdown });
        self
    }

    pub fn with_service(self, namespace: &str, name: &str) -> Self {
        self.lock()
            .services
            .entry(namespace.to_string())
            .or_default()
            .push(name.to_string());
        self
    }

    pub fn with_secret(self, namespace: &str, name: &str) -> Self {
        self.lock()
            .secrets
            .entry(namespace.to_string())
            .or_default()
            .push(name.to_string());
        self
    }

    pub fn with_deployment(self, namespace: &str, deployment: DeploymentConfig) -> Self {
        let name = deployment.metadata.name.clone().unwrap_or_default();
        self.lock().deployments.insert(
            (namespace.to_string(), name),
            FakeDeployment {
                config: deployment,
                countdown: 0,
                deleting: false,
            },
        );
        self
    }

    pub fn calls(&self) -> CallCounts {
        self.lock().calls.clone()
    }

    pub fn project_phase(&self, name: &str) -> Phase {
        self.lock()
            .projects
            .get(name)
            .map_or(Phase::Absent, |project| project.phase)
    }

    pub fn deployment(&self, namespace: &str, name: &str) -> Option<DeploymentConfig> {
        self.lock()
            .deployments
            .get(&(namespace.to_string(), name.to_string()))
            .map(|deployment| deployment.config.clone())
    }
}

fn project_object(name: &str, phase: Phase) -> Project {
    let mut project = Project::new(name, ProjectSpec::default());
    project.status = Some(ProjectStatus {
        phase: match phase {
            Phase::Requested => None,
            other => Some(other.to_string()),
        },
    });
    project
}

fn named_meta(namespace: &str, name: &str) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: Some(namespace.to_string()),
        ..Default::default()
    }
}

fn conflict(kind: &str, name: &str) -> ClientError {
    ClientError::Api {
        code: 409,
        reason: "AlreadyExists".to_string(),
        message: format!("{} \"{}\" already exists", kind, name),
    }
}

#[async_trait]
impl ControlPlaneClient for FakeControlPlane {
    async fn get_project(&self, name: &str) -> Result<Option<Project>, ClientError> {
        tokio::task::yield_now().await;
        let mut state = self.lock();
        state.check_call()?;
        state.calls.project_reads += 1;
        let stuck_terminating = state.stuck_terminating;

        let Some(project) = state.projects.get_mut(name) else {
            return Ok(None);
        };
        match project.phase {
            Phase::Requested if project.countdown == 0 => project.phase = Phase::Active,
            Phase::Requested => project.countdown -= 1,
            Phase::Terminating if stuck_terminating => {}
            Phase::Terminating if project.countdown == 0 => {
                state.projects.remove(name);
                return Ok(None);
            }
            Phase::Terminating => project.countdown -= 1,
            _ => {}
        }
        Ok(Some(project_object(name, project.phase)))
    }

    async fn create_project(&self, name: &str) -> Result<Project, ClientError> {
        tokio::task::yield_now().await;
        let mut state = self.lock();
        state.calls.project_creates += 1;
        if state.projects.contains_key(name) {
            return Err(conflict("projects", name));
        }
        let countdown = state.activation_reads;
        state.projects.insert(
            name.to_string(),
            FakeProject {
                phase: Phase::Requested,
                countdown,
            },
        );
        Ok(project_object(name, Phase::Requested))
    }

    async fn delete_project(&self, name: &str) -> Result<(), ClientError> {
        tokio::task::yield_now().await;
        let mut state = self.lock();
        state.check_call()?;
        state.calls.project_deletes += 1;
        let countdown = state.removal_reads;
        if let Some(project) = state.projects.get_mut(name) {
            project.phase = Phase::Terminating;
            project.countdown = countdown;
        }
        Ok(())
    }

    async fn get_namespace(&self, name: &str) -> Result<Option<Namespace>, ClientError> {
        let state = self.lock();
        Ok(state.projects.get(name).map(|project| Namespace {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            status: Some(NamespaceStatus {
                phase: Some(project.phase.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }))
    }

    async fn get_deployment_config(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<DeploymentConfig>, ClientError> {
        tokio::task::yield_now().await;
        let mut state = self.lock();
        state.check_call()?;
        state.calls.deployment_reads += 1;
        let stuck_available = state.stuck_available;

        let key = (namespace.to_string(), name.to_string());
        let Some(deployment) = state.deployments.get_mut(&key) else {
            return Ok(None);
        };
        if deployment.deleting {
            if deployment.countdown == 0 {
                state.deployments.remove(&key);
                return Ok(None);
            }
            deployment.countdown -= 1;
            return Ok(Some(deployment.config.clone()));
        }

        let available = match stuck_available {
            Some(stuck) => Some(stuck),
            None if deployment.countdown == 0 => Some(deployment.config.spec.replicas),
            None => {
                deployment.countdown -= 1;
                None
            }
        };
        if let Some(available) = available {
            deployment.config.status = Some(DeploymentConfigStatus {
                available_replicas: Some(available),
                replicas: Some(deployment.config.spec.replicas),
                ..Default::default()
            });
        }
        Ok(Some(deployment.config.clone()))
    }

    async fn create_deployment_config(
        &self,
        namespace: &str,
        deployment: &DeploymentConfig,
    ) -> Result<DeploymentConfig, ClientError> {
        tokio::task::yield_now().await;
        let mut state = self.lock();
        state.calls.deployment_creates += 1;
        let name = deployment.metadata.name.clone().unwrap_or_default();
        let key = (namespace.to_string(), name.clone());
        if state.deployments.contains_key(&key) {
            return Err(conflict("deploymentconfigs.apps.openshift.io", &name));
        }

        let mut created = deployment.clone();
        created.metadata.namespace = Some(namespace.to_string());
        created.status = None;
        let countdown = state.availability_reads;
        state.deployments.insert(
            key,
            FakeDeployment {
                config: created.clone(),
                countdown,
                deleting: false,
            },
        );
        Ok(created)
    }

    async fn delete_deployment_config(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClientError> {
        tokio::task::yield_now().await;
        let mut state = self.lock();
        state.check_call()?;
        state.calls.deployment_deletes += 1;
        let countdown = state.removal_reads;
        if let Some(deployment) = state
            .deployments
            .get_mut(&(namespace.to_string(), name.to_string()))
        {
            deployment.deleting = true;
            deployment.countdown = countdown;
        }
        Ok(())
    }

    async fn list_deployment_configs(
        &self,
        namespace: &str,
    ) -> Result<Vec<DeploymentConfig>, ClientError> {
        let state = self.lock();
        Ok(state
            .deployments
            .iter()
            .filter(|((ns, _), _)| ns == namespace)
            .map(|(_, deployment)| deployment.config.clone())
            .collect())
    }

    async fn list_services(&self, namespace: &str) -> Result<Vec<Service>, ClientError> {
        let state = self.lock();
        Ok(state
            .services
            .get(namespace)
            .into_iter()
            .flatten()
            .map(|name| Service {
                metadata: named_meta(namespace, name),
                ..Default::default()
            })
            .collect())
    }

    async fn list_secrets(&self, namespace: &str) -> Result<Vec<Secret>, ClientError> {
        let state = self.lock();
        Ok(state
            .secrets
            .get(namespace)
            .into_iter()
            .flatten()
            .map(|name| Secret {
                metadata: named_meta(namespace, name),
                ..Default::default()
            })
            .collect())
    }
}
