pub mod deploy_cmd;
pub mod namespace_cmd;
pub mod status_cmd;
pub mod undeploy_cmd;
