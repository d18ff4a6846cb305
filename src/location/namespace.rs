use crate::client::{ControlPlaneClient, SharedClient};
use crate::config::PollSettings;
use crate::errors::LocationError;
use crate::models::Phase;
use crate::poll::{retry_transient, wait_for_exit_condition, ExitCondition};
use k8s_openapi::api::core::v1::Namespace;
use tracing::{debug, info, warn};

/// Never created or deleted by a location.
pub const DEFAULT_NAMESPACE: &str = "default";

async fn describe_project(api: &dyn ControlPlaneClient, name: &str) -> String {
    match api.get_project(name).await {
        Ok(None) => format!("Project for {} absent", name),
        Ok(Some(project)) => format!(
            "Project for {} status {}",
            name,
            Phase::of(Some(&project))
        ),
        Err(e) => format!("Project for {} could not be read: {}", name, e),
    }
}

async fn wait_for_phase(
    api: &dyn ControlPlaneClient,
    name: &str,
    phase: Phase,
    poll: &PollSettings,
) -> Result<(), LocationError> {
    let condition = ExitCondition::new(
        format!("project {} to become {}", name, phase),
        move || async move {
            api.get_project(name)
                .await
                .map(|project| Phase::of(project.as_ref()) == phase)
        },
        move || describe_project(api, name),
    );
    wait_for_exit_condition(condition, poll).await
}

/// Returns the namespace behind project `name` once it is `Active`, creating
/// the project first when it is missing and `create` is set. Without
/// `create`, a missing or terminating project is `NamespaceNotFound`.
///
/// The whole lookup/create/wait sequence runs under the client's namespace
/// lock, so concurrent callers for the same name issue a single create.
pub async fn ensure_namespace(
    client: &SharedClient,
    name: &str,
    create: bool,
    poll: &PollSettings,
) -> Result<Namespace, LocationError> {
    poll.validate()?;
    let _guard = client.lock_namespaces().await;
    let api = client.api();

    let existing = retry_transient(&format!("project {} lookup", name), poll, || {
        api.get_project(name)
    })
    .await?;
    let phase = Phase::of(existing.as_ref());
    match phase {
        Phase::Absent | Phase::Terminating if !create => {
            return Err(LocationError::NamespaceNotFound {
                name: name.to_string(),
            });
        }
        Phase::Terminating => {
            info!(
                "[OpenShift] Project {} is terminating; waiting for it to go away before recreating",
                name
            );
            wait_for_phase(api, name, Phase::Absent, poll).await?;
            create_project(api, name).await?;
        }
        Phase::Absent => create_project(api, name).await?,
        phase => debug!("[OpenShift] Found project {} in phase {}", name, phase),
    }

    if !phase.is_usable() {
        wait_for_phase(api, name, Phase::Active, poll).await?;
    }
    api.get_namespace(name)
        .await?
        .ok_or_else(|| LocationError::NamespaceNotFound {
            name: name.to_string(),
        })
}

async fn create_project(api: &dyn ControlPlaneClient, name: &str) -> Result<(), LocationError> {
    match api.create_project(name).await {
        Ok(_) => {
            info!("[OpenShift] Created project {}", name);
            Ok(())
        }
        // Someone outside this location got there first; wait on theirs.
        Err(e) if e.is_conflict() => {
            debug!("[OpenShift] Project {} already exists: {}", name, e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// True when the namespace holds no deployment configs, services or secrets.
/// A point-in-time read, not a wait.
pub async fn is_namespace_empty(
    api: &dyn ControlPlaneClient,
    namespace: &str,
) -> Result<bool, LocationError> {
    Ok(api.list_deployment_configs(namespace).await?.is_empty()
        && api.list_services(namespace).await?.is_empty()
        && api.list_secrets(namespace).await?.is_empty())
}

/// Deletes project `name` if it is empty and waits until it is gone.
///
/// The default namespace, non-empty namespaces and projects that are
/// missing or already terminating are left alone. Timing out while waiting
/// for the project to disappear is logged, not returned.
pub async fn delete_empty_namespace(
    client: &SharedClient,
    name: &str,
    poll: &PollSettings,
) -> Result<(), LocationError> {
    if name == DEFAULT_NAMESPACE {
        debug!("[OpenShift] Never deleting the {} namespace", name);
        return Ok(());
    }
    poll.validate()?;
    let _guard = client.lock_namespaces().await;
    let api = client.api();

    if !is_namespace_empty(api, name).await? {
        debug!("[OpenShift] Namespace {} is not empty, keeping it", name);
        return Ok(());
    }
    match Phase::of(api.get_project(name).await?.as_ref()) {
        Phase::Absent | Phase::Terminating => {
            debug!("[OpenShift] Project {} already gone or going", name);
            return Ok(());
        }
        _ => {}
    }

    retry_transient(&format!("project {} delete", name), poll, || {
        api.delete_project(name)
    })
    .await?;
    info!("[OpenShift] Deleted empty project {}", name);

    let condition = ExitCondition::new(
        format!("project {} to be removed", name),
        move || async move { api.get_project(name).await.map(|project| project.is_none()) },
        move || async move { format!("Project {} still present", name) },
    );
    match wait_for_exit_condition(condition, poll).await {
        Err(e) if e.is_timeout() => {
            warn!("[OpenShift] Cleanup of project {} incomplete: {}", name, e);
            Ok(())
        }
        other => other,
    }
}
