mod cli;
mod commands;

use crate::cli::{Cli, Commands};
use clap::Parser;
use openshift_location::{KubeconfigRegistry, LocationConfig, OpenShiftLocation};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with INFO level
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = LocationConfig::load(cli.config.as_deref().map(Path::new))?;
    let location = OpenShiftLocation::new(config, Arc::new(KubeconfigRegistry));

    match cli.command {
        Commands::EnsureNamespace { name, no_create } => {
            commands::namespace_cmd::ensure(&location, &name, no_create).await?;
        }
        Commands::Deploy(args) => {
            commands::deploy_cmd::execute(&location, args).await?;
        }
        Commands::Undeploy {
            namespace,
            name,
            cleanup,
        } => {
            commands::undeploy_cmd::execute(&location, &namespace, &name, cleanup).await?;
        }
        Commands::Cleanup { namespace } => {
            commands::namespace_cmd::cleanup(&location, &namespace).await?;
        }
        Commands::Status { namespace } => {
            commands::status_cmd::execute(&location, &namespace).await?;
        }
    }

    Ok(())
}
