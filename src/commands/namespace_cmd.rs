use anyhow::{Context, Result};
use openshift_location::{Location, OpenShiftLocation};

pub async fn ensure(location: &OpenShiftLocation, name: &str, no_create: bool) -> Result<()> {
    let create = location.config().namespace_create && !no_create;
    let namespace = location
        .ensure_namespace(name, create)
        .await
        .with_context(|| format!("Namespace {} is not ready", name))?;

    let phase = namespace
        .status
        .and_then(|status| status.phase)
        .unwrap_or_else(|| "Unknown".to_string());
    println!("Namespace {} is {}", name, phase);
    Ok(())
}

pub async fn cleanup(location: &OpenShiftLocation, namespace: &str) -> Result<()> {
    if !location.is_namespace_empty(namespace).await? {
        println!("Namespace {} is not empty, leaving it in place", namespace);
        return Ok(());
    }
    location.delete_empty_namespace(namespace).await?;

    let api = location.get_client().await?.api();
    let gone = api.get_project(namespace).await?.is_none();
    println!("{}", cleanup_outcome(namespace, gone));
    Ok(())
}

fn cleanup_outcome(namespace: &str, gone: bool) -> String {
    if gone {
        format!("Namespace {} cleaned up", namespace)
    } else {
        format!(
            "Deletion of namespace {} requested; it has not disappeared yet",
            namespace
        )
    }
}
