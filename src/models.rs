use crate::config::PollSettings;
use crate::errors::LocationError;
use crate::openshift::{DeploymentConfig, Project};
use k8s_openapi::api::core::v1::Container;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Lifecycle phase of a project as observed from the control plane.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Requested,
    Active,
    Terminating,
    Absent,
}

impl Phase {
    /// Phase of an observed project; `None` means the lookup came back empty.
    /// A project without a reported phase has not finished provisioning yet.
    pub fn of(project: Option<&Project>) -> Self {
        let Some(project) = project else {
            return Phase::Absent;
        };
        project
            .status
            .as_ref()
            .and_then(|status| status.phase.as_deref())
            .and_then(|phase| phase.parse().ok())
            .unwrap_or(Phase::Requested)
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, Phase::Active)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Requested => write!(f, "Requested"),
            Phase::Active => write!(f, "Active"),
            Phase::Terminating => write!(f, "Terminating"),
            Phase::Absent => write!(f, "Absent"),
        }
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "requested" | "pending" => Ok(Phase::Requested),
            "active" => Ok(Phase::Active),
            "terminating" => Ok(Phase::Terminating),
            "absent" => Ok(Phase::Absent),
            _ => Err(format!("Unknown project phase: {}", s)),
        }
    }
}

/// One deployable workload: a single container run under a recreate-strategy
/// deployment config inside a project.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentUnit {
    pub name: String,
    pub replicas: i32,
    pub container: Container,
    pub labels: BTreeMap<String, String>,
    pub pull_secrets: BTreeSet<String>,
    pub entity_id: String,
    pub application_id: String,
    /// Overrides the location's poll settings for this deploy call.
    pub poll: Option<PollSettings>,
}

impl DeploymentUnit {
    pub fn new(name: impl Into<String>, container: Container) -> Self {
        Self {
            name: name.into(),
            replicas: 1,
            container,
            labels: BTreeMap::new(),
            pull_secrets: BTreeSet::new(),
            entity_id: String::new(),
            application_id: String::new(),
            poll: None,
        }
    }

    pub fn with_replicas(mut self, replicas: i32) -> Self {
        self.replicas = replicas;
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_pull_secret(mut self, secret: impl Into<String>) -> Self {
        self.pull_secrets.insert(secret.into());
        self
    }

    pub fn with_owner(
        mut self,
        entity_id: impl Into<String>,
        application_id: impl Into<String>,
    ) -> Self {
        self.entity_id = entity_id.into();
        self.application_id = application_id.into();
        self
    }

    pub fn with_poll(mut self, poll: PollSettings) -> Self {
        self.poll = Some(poll);
        self
    }

    pub fn validate(&self) -> Result<(), LocationError> {
        if self.name.trim().is_empty() {
            return Err(LocationError::InvalidSpec(
                "deployment name must not be empty".to_string(),
            ));
        }
        if self.replicas < 0 {
            return Err(LocationError::InvalidSpec(format!(
                "replica count for {} must not be negative, got {}",
                self.name, self.replicas
            )));
        }
        if self.container.image.as_deref().unwrap_or("").is_empty() {
            return Err(LocationError::InvalidSpec(format!(
                "container for {} has no image",
                self.name
            )));
        }
        if let Some(poll) = &self.poll {
            poll.validate()?;
        }
        Ok(())
    }
}

/// Ready once the control plane reports exactly `desired` available replicas.
/// A missing status or a missing count is never ready, even for zero replicas.
pub fn replicas_available(deployment: Option<&DeploymentConfig>, desired: i32) -> bool {
    deployment
        .and_then(|dc| dc.status.as_ref())
        .and_then(|status| status.available_replicas)
        == Some(desired)
}
