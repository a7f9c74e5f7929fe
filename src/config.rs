// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Connection and namespacing settings for a Redis-backed map
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MapConfig {
    /// Redis host (default: "localhost")
    #[serde(default = "default_host")]
    pub host: String,

    /// Redis port (default: 6379)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Redis database number (default: 0)
    #[serde(default)]
    pub db: u32,

    /// Optional password for Redis authentication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Namespace for every key the map owns; a ":" separator is appended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_prefix: Option<String>,

    /// Maximum number of concurrent store round trips (default: 128)
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: usize,

    /// Connection timeout in milliseconds (default: 5000 = 5 seconds)
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            db: 0,
            password: None,
            key_prefix: None,
            max_pool_size: default_max_pool_size(),
            connection_timeout_ms: default_connection_timeout_ms(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    6379
}

fn default_max_pool_size() -> usize {
    128
}

fn default_connection_timeout_ms() -> u64 {
    5000 // 5 seconds
}

impl MapConfig {
    /// Config for `host:port` with an optional key namespace
    pub fn new(host: impl Into<String>, port: u16, key_prefix: Option<&str>) -> Self {
        Self {
            host: host.into(),
            port,
            key_prefix: key_prefix.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, String> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| e.to_string())?;

        let mut missing = None;
        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                missing.get_or_insert_with(|| var_name.to_string());
                String::new()
            })
        });
        if let Some(var_name) = missing {
            return Err(format!(
                "Environment variable '{}' is referenced but not set",
                var_name
            ));
        }

        let config: MapConfig = serde_yaml::from_str(&substituted).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("port must be greater than 0".to_string());
        }
        if self.max_pool_size == 0 {
            return Err("max_pool_size must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Connection URL in the form `redis://[:password@]host:port/db`
    pub fn redis_url(&self) -> String {
        match &self.password {
            Some(password) => format!(
                "redis://:{}@{}:{}/{}",
                urlencoding::encode(password),
                self.host,
                self.port,
                self.db
            ),
            None => format!("redis://{}:{}/{}", self.host, self.port, self.db),
        }
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_millis(self.connection_timeout_ms)
    }
}
