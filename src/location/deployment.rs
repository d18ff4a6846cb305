use crate::client::ControlPlaneClient;
use crate::config::PollSettings;
use crate::errors::LocationError;
use crate::models::{replicas_available, DeploymentUnit};
use crate::openshift::{
    DeploymentConfig, DeploymentConfigSpec, DeploymentStrategy, DeploymentTriggerPolicy,
    CONFIG_CHANGE_TRIGGER, RECREATE_STRATEGY,
};
use crate::poll::{retry_transient, wait_for_exit_condition, ExitCondition};
use k8s_openapi::api::core::v1::{LocalObjectReference, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub const GENERATED_BY_ANNOTATION: &str = "openshift.io/generated-by";
pub const GENERATED_BY: &str = "AMP";
pub const ENTITY_ID_ANNOTATION: &str = "cloudsoft.io/entity-id";
pub const APPLICATION_ID_ANNOTATION: &str = "cloudsoft.io/application-id";
/// Pod label the deployment config selects on.
pub const NAME_LABEL: &str = "name";

pub fn build_pod_template(unit: &DeploymentUnit) -> PodTemplateSpec {
    let mut labels = unit.labels.clone();
    labels.insert(NAME_LABEL.to_string(), unit.name.clone());

    let image_pull_secrets = if unit.pull_secrets.is_empty() {
        None
    } else {
        Some(
            unit.pull_secrets
                .iter()
                .map(|secret| LocalObjectReference {
                    name: secret.clone().into(),
                })
                .collect(),
        )
    };

    PodTemplateSpec {
        metadata: Some(ObjectMeta {
            labels: Some(labels),
            ..Default::default()
        }),
        spec: Some(PodSpec {
            containers: vec![unit.container.clone()],
            image_pull_secrets,
            ..Default::default()
        }),
    }
}

/// Recreate strategy, a single config-change trigger, and ownership annotations.
pub fn build_deployment_config(unit: &DeploymentUnit) -> DeploymentConfig {
    let spec = DeploymentConfigSpec {
        replicas: unit.replicas,
        selector: BTreeMap::from([(NAME_LABEL.to_string(), unit.name.clone())]),
        strategy: DeploymentStrategy {
            type_: RECREATE_STRATEGY.to_string(),
        },
        triggers: vec![DeploymentTriggerPolicy {
            type_: CONFIG_CHANGE_TRIGGER.to_string(),
        }],
        template: build_pod_template(unit),
    };

    let mut deployment = DeploymentConfig::new(&unit.name, spec);
    deployment.metadata.annotations = Some(BTreeMap::from([
        (GENERATED_BY_ANNOTATION.to_string(), GENERATED_BY.to_string()),
        (ENTITY_ID_ANNOTATION.to_string(), unit.entity_id.clone()),
        (
            APPLICATION_ID_ANNOTATION.to_string(),
            unit.application_id.clone(),
        ),
    ]));
    deployment
}

async fn describe_deployment(
    api: &dyn ControlPlaneClient,
    namespace: &str,
    name: &str,
    desired: i32,
) -> String {
    match api.get_deployment_config(namespace, name).await {
        Ok(deployment) => {
            let present = deployment.is_some();
            let status = deployment.and_then(|dc| dc.status);
            format!(
                "Namespace={}; deploymentName={}; desiredReplicas={}; present={}; status={:?}",
                namespace, name, desired, present, status
            )
        }
        Err(e) => format!(
            "Namespace={}; deploymentName={}; desiredReplicas={}; lookup failed: {}",
            namespace, name, desired, e
        ),
    }
}

/// Creates the deployment config for `unit` and waits until the control
/// plane reports exactly `unit.replicas` available replicas.
///
/// If a deployment config of that name already exists the create is skipped
/// and the wait runs against the existing object.
pub async fn deploy(
    api: &dyn ControlPlaneClient,
    namespace: &str,
    unit: &DeploymentUnit,
    poll: &PollSettings,
) -> Result<(), LocationError> {
    unit.validate()?;
    poll.validate()?;

    let descriptor = build_deployment_config(unit);
    match api.create_deployment_config(namespace, &descriptor).await {
        Ok(_) => info!(
            "[OpenShift] Created deployment config {} in namespace {}",
            unit.name, namespace
        ),
        Err(e) if e.is_conflict() => warn!(
            "[OpenShift] Deployment config {} already exists in namespace {}; waiting on it",
            unit.name, namespace
        ),
        Err(e) => return Err(e.into()),
    }

    let name = unit.name.as_str();
    let desired = unit.replicas;
    let condition = ExitCondition::new(
        format!("deploymentconfig {}/{} to have {} available replicas", namespace, name, desired),
        move || async move {
            api.get_deployment_config(namespace, name)
                .await
                .map(|deployment| replicas_available(deployment.as_ref(), desired))
        },
        move || describe_deployment(api, namespace, name, desired),
    );
    wait_for_exit_condition(condition, poll).await?;

    info!(
        "[OpenShift] Deployed {} with {} replica(s) to namespace {}",
        name, desired, namespace
    );
    Ok(())
}

/// Deletes the deployment config and waits until lookups come back empty.
/// A deployment config that never existed counts as already removed.
pub async fn undeploy(
    api: &dyn ControlPlaneClient,
    namespace: &str,
    name: &str,
    poll: &PollSettings,
) -> Result<(), LocationError> {
    poll.validate()?;

    retry_transient(
        &format!("deploymentconfig {}/{} delete", namespace, name),
        poll,
        || api.delete_deployment_config(namespace, name),
    )
    .await?;
    debug!(
        "[OpenShift] Requested deletion of deployment config {} in namespace {}",
        name, namespace
    );

    let condition = ExitCondition::new(
        format!("deploymentconfig {}/{} to be removed", namespace, name),
        move || async move {
            api.get_deployment_config(namespace, name)
                .await
                .map(|deployment| deployment.is_none())
        },
        move || async move {
            format!(
                "Deployment config still present with namespace={}, deployment={}",
                namespace, name
            )
        },
    );
    wait_for_exit_condition(condition, poll).await?;

    info!(
        "[OpenShift] Undeployed {} from namespace {}",
        name, namespace
    );
    Ok(())
}
