use anyhow::Result;
use openshift_location::{Location, OpenShiftLocation, Phase};

pub async fn execute(location: &OpenShiftLocation, namespace: &str) -> Result<()> {
    let api = location.get_client().await?.api();
    let phase = Phase::of(api.get_project(namespace).await?.as_ref());
    println!("Project {}: {}", namespace, phase);
    if phase == Phase::Absent {
        return Ok(());
    }

    let deployments = api.list_deployment_configs(namespace).await?;
    let mut table = prettytable::Table::new();
    table.add_row(prettytable::Row::new(vec![
        prettytable::Cell::new("NAME"),
        prettytable::Cell::new("DESIRED"),
        prettytable::Cell::new("AVAILABLE"),
        prettytable::Cell::new("STRATEGY"),
    ]));
    for dc in &deployments {
        let available = dc
            .status
            .as_ref()
            .and_then(|status| status.available_replicas)
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        table.add_row(prettytable::Row::new(vec![
            prettytable::Cell::new(dc.metadata.name.as_deref().unwrap_or("N/A")),
            prettytable::Cell::new(&dc.spec.replicas.to_string()),
            prettytable::Cell::new(&available),
            prettytable::Cell::new(&dc.spec.strategy.type_),
        ]));
    }
    table.printstd();

    let empty = location.is_namespace_empty(namespace).await?;
    println!("Empty: {}", empty);
    Ok(())
}
