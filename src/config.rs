use serde::Deserialize;

use crate::session::{DEFAULT_GUID_NAMESPACE, DEFAULT_POLL_INTERVAL_SECS};
use crate::transport::DEFAULT_COLLECTOR_URL;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub agent: AgentConfig,
    pub collector: CollectorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub system: SystemConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Plugin name; part of every derived component GUID.
    pub name: String,
    #[serde(default = "default_guid_namespace")]
    pub guid_namespace: String,
    /// Cycle period, and the elapsed duration reported by the first cycle.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_guid_namespace() -> String {
    DEFAULT_GUID_NAMESPACE.to_string()
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    #[serde(default = "default_collector_url")]
    pub url: String,
    pub license_key: String,
    /// Upper bound on one transmission, connect included.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Log every payload at debug level.
    #[serde(default)]
    pub verbose: bool,
}

fn default_collector_url() -> String {
    DEFAULT_COLLECTOR_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_system_component_name")]
    pub component_name: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            component_name: default_system_component_name(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_system_component_name() -> String {
    "System".to_string()
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("read config {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.agent.name.trim().is_empty(),
            "agent.name must be non-empty"
        );
        anyhow::ensure!(
            self.agent.poll_interval_secs > 0,
            "agent.poll_interval_secs must be > 0, got {}",
            self.agent.poll_interval_secs
        );
        anyhow::ensure!(
            !self.collector.license_key.trim().is_empty(),
            "collector.license_key must be non-empty"
        );
        anyhow::ensure!(
            self.collector.url.starts_with("http://") || self.collector.url.starts_with("https://"),
            "collector.url must be an http(s) URL, got {:?}",
            self.collector.url
        );
        anyhow::ensure!(
            self.collector.timeout_secs > 0,
            "collector.timeout_secs must be > 0, got {}",
            self.collector.timeout_secs
        );
        anyhow::ensure!(
            self.collector.timeout_secs <= self.agent.poll_interval_secs,
            "collector.timeout_secs ({}) must not exceed agent.poll_interval_secs ({})",
            self.collector.timeout_secs,
            self.agent.poll_interval_secs
        );
        anyhow::ensure!(
            !self.logging.level.trim().is_empty(),
            "logging.level must be non-empty"
        );
        Ok(())
    }
}
