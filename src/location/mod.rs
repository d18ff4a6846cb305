pub mod base;
pub mod deployment;
pub mod namespace;
pub mod openshift;

pub use base::Location;
pub use namespace::DEFAULT_NAMESPACE;
pub use openshift::OpenShiftLocation;
