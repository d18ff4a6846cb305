use k8s_openapi::api::core::v1::PodTemplateSpec;
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const RECREATE_STRATEGY: &str = "Recreate";
pub const CONFIG_CHANGE_TRIGGER: &str = "ConfigChange";

/// `apps.openshift.io/v1` DeploymentConfig.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default)]
#[kube(
    group = "apps.openshift.io",
    version = "v1",
    kind = "DeploymentConfig",
    plural = "deploymentconfigs",
    namespaced,
    status = "DeploymentConfigStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfigSpec {
    #[serde(default)]
    pub replicas: i32,
    #[serde(default)]
    pub selector: BTreeMap<String, String>,
    #[serde(default)]
    pub strategy: DeploymentStrategy,
    #[serde(default)]
    pub triggers: Vec<DeploymentTriggerPolicy>,
    #[serde(default)]
    pub template: PodTemplateSpec,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct DeploymentStrategy {
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct DeploymentTriggerPolicy {
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfigStatus {
    pub available_replicas: Option<i32>,
    pub ready_replicas: Option<i32>,
    pub replicas: Option<i32>,
    pub latest_version: Option<i64>,
    pub observed_generation: Option<i64>,
}
