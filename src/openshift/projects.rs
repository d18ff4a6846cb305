use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// `project.openshift.io/v1` Project. Cluster scoped; shares its name with a namespace.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default)]
#[kube(
    group = "project.openshift.io",
    version = "v1",
    kind = "Project",
    plural = "projects",
    status = "ProjectStatus",
    schema = "disabled"
)]
pub struct ProjectSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalizers: Option<Vec<String>>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ProjectStatus {
    pub phase: Option<String>,
}
