use anyhow::{Context, Result};
use openshift_location::{Location, OpenShiftLocation};

pub async fn execute(
    location: &OpenShiftLocation,
    namespace: &str,
    name: &str,
    cleanup: bool,
) -> Result<()> {
    location
        .undeploy(namespace, name)
        .await
        .with_context(|| format!("Failed to undeploy {}/{}", namespace, name))?;
    println!("Removed {} from namespace {}", name, namespace);

    if cleanup {
        location.delete_empty_namespace(namespace).await?;
    }
    Ok(())
}
