use std::time::Duration;

use config::Config;
use config::Environment;
use config::File;
use nanoid::nanoid;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Immutable run configuration, supplied once at start.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WatchConfig {
    /// Comma-separated broker addresses (host:port)
    pub bootstrap_servers: String,

    /// Topic to watch
    pub topic: String,

    /// Number of messages to wait for
    #[serde(default = "default_message_count")]
    pub message_count: u64,

    /// Wall-clock deadline for the whole run (unit: milliseconds)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Consumer group identity; generated unique per run if absent so that
    /// repeated runs never collide on committed offsets
    #[serde(default = "default_group_id")]
    pub group_id: String,

    /// Consume from the earliest offset instead of only new messages
    #[serde(default)]
    pub from_beginning: bool,
}

impl WatchConfig {
    /// Load configuration from an optional config file and the environment,
    /// with environment variables taking priority.
    ///
    /// # Arguments
    /// * `path` - Optional path to a TOML config file
    ///
    /// # Returns
    /// Merged and validated configuration
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path));
        }
        let config = builder
            .add_source(Environment::with_prefix("TOPIC_GATE").try_parsing(true))
            .build()?;

        let watch: WatchConfig = config.try_deserialize()?;
        watch.validate()?;
        Ok(watch)
    }

    /// Validates run configuration consistency
    /// # Errors
    /// Returns `Error::InvalidConfig` if any configuration rules are violated
    pub fn validate(&self) -> Result<()> {
        if self.brokers().is_empty() {
            return Err(Error::InvalidConfig(
                "bootstrap_servers must contain at least one host:port address".into(),
            ));
        }

        if self.topic.trim().is_empty() {
            return Err(Error::InvalidConfig("topic cannot be empty".into()));
        }

        if self.message_count == 0 {
            return Err(Error::InvalidConfig("message_count must be at least 1".into()));
        }

        if self.group_id.trim().is_empty() {
            return Err(Error::InvalidConfig("group_id cannot be empty".into()));
        }

        Ok(())
    }

    /// Broker address list, trimmed, empty entries discarded
    pub fn brokers(&self) -> Vec<String> {
        self.bootstrap_servers
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// The run deadline as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_message_count() -> u64 {
    1
}
fn default_timeout_ms() -> u64 {
    60000
}
fn default_group_id() -> String {
    format!("topic-gate-{}", nanoid!(12))
}
