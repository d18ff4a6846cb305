pub mod deployment_configs;
pub mod projects;

pub use deployment_configs::*;
pub use projects::*;
