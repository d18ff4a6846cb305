use crate::errors::LocationError;
use dotenv::dotenv;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// How long to wait for a condition and how often to re-check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_POLL_TIMEOUT,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl PollSettings {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    /// The interval must be non-zero and no longer than the timeout.
    pub fn validate(&self) -> Result<(), LocationError> {
        if self.interval.is_zero() {
            return Err(LocationError::Configuration(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        if self.interval > self.timeout {
            return Err(LocationError::Configuration(format!(
                "poll interval {:?} exceeds timeout {:?}",
                self.interval, self.timeout
            )));
        }
        Ok(())
    }
}

/// Settings for a single location.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationConfig {
    /// Create missing projects instead of failing.
    pub namespace_create: bool,
    pub poll: PollSettings,
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            namespace_create: true,
            poll: PollSettings::default(),
            kubeconfig: None,
            context: None,
        }
    }
}

/// On-disk form of [`LocationConfig`]. Durations are humantime strings ("5m", "2s").
#[derive(Serialize, Deserialize, Default, Debug)]
pub struct LocationConfigFile {
    pub namespace_create: Option<bool>,
    pub poll_timeout: Option<String>,
    pub poll_interval: Option<String>,
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
}

impl LocationConfigFile {
    pub fn read(path: &Path) -> Result<Self, LocationError> {
        let yaml = fs::read_to_string(path).map_err(|e| {
            LocationError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_yaml::from_str(&yaml).map_err(|e| {
            LocationError::Configuration(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

impl LocationConfig {
    /// Defaults, then environment, then the optional YAML file.
    pub fn load(path: Option<&Path>) -> Result<Self, LocationError> {
        let mut config = Self::default().apply_env(&CONFIG)?;
        if let Some(path) = path {
            config = config.apply_file(LocationConfigFile::read(path)?)?;
        }
        config.poll.validate()?;
        Ok(config)
    }

    pub fn apply_env(mut self, env: &EnvConfig) -> Result<Self, LocationError> {
        if let Some(timeout) = &env.poll_timeout {
            self.poll.timeout = parse_duration("LOCATION_POLL_TIMEOUT", timeout)?;
        }
        if let Some(interval) = &env.poll_interval {
            self.poll.interval = parse_duration("LOCATION_POLL_INTERVAL", interval)?;
        }
        if let Some(create) = &env.namespace_create {
            self.namespace_create = parse_bool("LOCATION_NAMESPACE_CREATE", create)?;
        }
        if let Some(path) = &env.kubeconfig {
            self.kubeconfig = Some(PathBuf::from(path));
        }
        if let Some(context) = &env.kube_context {
            self.context = Some(context.clone());
        }
        Ok(self)
    }

    pub fn apply_file(mut self, file: LocationConfigFile) -> Result<Self, LocationError> {
        if let Some(timeout) = file.poll_timeout {
            self.poll.timeout = parse_duration("poll_timeout", &timeout)?;
        }
        if let Some(interval) = file.poll_interval {
            self.poll.interval = parse_duration("poll_interval", &interval)?;
        }
        if let Some(create) = file.namespace_create {
            self.namespace_create = create;
        }
        if file.kubeconfig.is_some() {
            self.kubeconfig = file.kubeconfig;
        }
        if file.context.is_some() {
            self.context = file.context;
        }
        Ok(self)
    }
}

fn parse_duration(key: &str, value: &str) -> Result<Duration, LocationError> {
    humantime::parse_duration(value.trim()).map_err(|e| {
        LocationError::Configuration(format!("{}: invalid duration {:?}: {}", key, value, e))
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, LocationError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(LocationError::Configuration(format!(
            "{}: expected a boolean, got {:?}",
            key, other
        ))),
    }
}

/// Raw values picked up from the process environment (and `.env`).
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub poll_timeout: Option<String>,
    pub poll_interval: Option<String>,
    pub namespace_create: Option<String>,
    pub kubeconfig: Option<String>,
    pub kube_context: Option<String>,
}

impl EnvConfig {
    fn new() -> Self {
        dotenv().ok();

        Self {
            poll_timeout: env::var("LOCATION_POLL_TIMEOUT").ok(),
            poll_interval: env::var("LOCATION_POLL_INTERVAL").ok(),
            namespace_create: env::var("LOCATION_NAMESPACE_CREATE").ok(),
            kubeconfig: env::var("KUBECONFIG").ok(),
            kube_context: env::var("KUBE_CONTEXT").ok(),
        }
    }
}

// Global static CONFIG instance
pub static CONFIG: Lazy<EnvConfig> = Lazy::new(EnvConfig::new);
