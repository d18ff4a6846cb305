use clap::{Args, Parser, Subcommand};

/// Converge namespaces and deployments on an OpenShift cluster.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// YAML file with location settings (overrides the environment).
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// The subcommands supported by the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Make sure a project exists and is active.
    EnsureNamespace {
        /// Project name.
        name: String,

        /// Fail instead of creating the project when it is missing.
        #[arg(long, default_value_t = false)]
        no_create: bool,
    },

    /// Deploy a container and wait for it to become available.
    Deploy(DeployArgs),

    /// Remove a deployment and wait for it to disappear.
    Undeploy {
        /// Project holding the deployment.
        #[arg(long, short)]
        namespace: String,

        /// Deployment name.
        #[arg(long)]
        name: String,

        /// Delete the project afterwards if nothing is left in it.
        #[arg(long, default_value_t = false)]
        cleanup: bool,
    },

    /// Delete a project if it is empty.
    Cleanup {
        /// Project name.
        namespace: String,
    },

    /// Show what a project contains.
    Status {
        /// Project name.
        #[arg(long, short)]
        namespace: String,
    },
}

#[derive(Args)]
pub struct DeployArgs {
    /// Project to deploy into; created if missing unless namespace creation is disabled.
    #[arg(long, short)]
    pub namespace: String,

    /// Deployment name.
    #[arg(long)]
    pub name: String,

    /// Container image.
    #[arg(long)]
    pub image: String,

    /// Desired replica count.
    #[arg(long, default_value_t = 1)]
    pub replicas: i32,

    /// Image pull secret to attach (repeatable).
    #[arg(long = "pull-secret")]
    pub pull_secrets: Vec<String>,

    /// Pod label as key=value (repeatable).
    #[arg(long = "label", value_parser = parse_key_val)]
    pub labels: Vec<(String, String)>,

    /// Owning entity id recorded on the deployment.
    #[arg(long, default_value = "")]
    pub entity_id: String,

    /// Owning application id recorded on the deployment.
    #[arg(long, default_value = "")]
    pub application_id: String,

    /// How long to wait for the deployment, e.g. "5m".
    #[arg(long)]
    pub timeout: Option<String>,

    /// How often to check, e.g. "5s".
    #[arg(long)]
    pub interval: Option<String>,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((key.to_string(), value.to_string()))
}
