pub mod base;
pub mod openshift;
pub mod registry;

#[cfg(test)]
pub(crate) mod fake;

pub use base::{ClientError, ControlPlaneClient, SharedClient};
pub use openshift::OpenShiftClient;
pub use registry::{ClientRegistry, KubeconfigRegistry};
