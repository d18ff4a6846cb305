use crate::cli::DeployArgs;
use anyhow::{Context, Result};
use k8s_openapi::api::core::v1::Container;
use openshift_location::{DeploymentUnit, Location, OpenShiftLocation, PollSettings};

fn poll_settings(location: &OpenShiftLocation, args: &DeployArgs) -> Result<PollSettings> {
    let mut poll = location.config().poll;
    if let Some(timeout) = &args.timeout {
        poll.timeout = humantime::parse_duration(timeout)
            .with_context(|| format!("Invalid --timeout {:?}", timeout))?;
    }
    if let Some(interval) = &args.interval {
        poll.interval = humantime::parse_duration(interval)
            .with_context(|| format!("Invalid --interval {:?}", interval))?;
    }
    Ok(poll)
}

pub async fn execute(location: &OpenShiftLocation, args: DeployArgs) -> Result<()> {
    let poll = poll_settings(location, &args)?;

    let container = Container {
        name: args.name.clone(),
        image: Some(args.image.clone()),
        ..Default::default()
    };
    let mut unit = DeploymentUnit::new(&args.name, container)
        .with_replicas(args.replicas)
        .with_owner(args.entity_id, args.application_id)
        .with_poll(poll);
    for (key, value) in args.labels {
        unit = unit.with_label(key, value);
    }
    for secret in args.pull_secrets {
        unit = unit.with_pull_secret(secret);
    }

    let create = location.config().namespace_create;
    location
        .ensure_namespace(&args.namespace, create)
        .await
        .with_context(|| format!("Namespace {} is not ready", args.namespace))?;

    location
        .deploy(&args.namespace, &unit)
        .await
        .with_context(|| format!("Failed to deploy {}/{}", args.namespace, args.name))?;

    println!(
        "Deployed {} ({} replica(s)) to namespace {}",
        args.name, args.replicas, args.namespace
    );
    Ok(())
}
