// src/lib.rs

pub mod client;
pub mod config;
pub mod errors;
pub mod location;
pub mod models;
pub mod openshift;
pub mod poll;

pub use client::{ClientRegistry, ControlPlaneClient, KubeconfigRegistry, SharedClient};
pub use config::{LocationConfig, PollSettings};
pub use errors::LocationError;
pub use location::{Location, OpenShiftLocation};
pub use models::{DeploymentUnit, Phase};
