//! Configuration types for the Universal Data Connector.
//!
//! Configuration is loaded from a single YAML file (`udc.yaml` by default).
//! Every section is optional; a missing file yields the defaults.
//!
//! ```yaml
//! project: acme-data
//! data:
//!   directory: ./data
//! server:
//!   host: 0.0.0.0
//!   port: 8000
//! llm:
//!   model: llama-3.1-8b-instant
//!   api_key_env: GROQ_API_KEY
//! logging:
//!   level: info
//! ```

pub mod llm;
pub mod server;

use crate::source::Source;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use llm::LlmConfig;
pub use server::ServerConfig;

/// Complete configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UdcConfig {
    /// Project name, informational only.
    #[serde(default)]
    pub project: Option<String>,

    /// Backing data files.
    #[serde(default)]
    pub data: DataConfig,

    /// HTTP API settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat model settings.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Location of the JSON files backing each source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    /// Directory holding the data files.
    #[serde(default = "default_data_directory")]
    pub directory: PathBuf,

    /// CRM customer records.
    #[serde(default = "default_customers_file")]
    pub customers_file: String,

    /// Support tickets.
    #[serde(default = "default_tickets_file")]
    pub tickets_file: String,

    /// Analytics metric points.
    #[serde(default = "default_analytics_file")]
    pub analytics_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            directory: default_data_directory(),
            customers_file: default_customers_file(),
            tickets_file: default_tickets_file(),
            analytics_file: default_analytics_file(),
        }
    }
}

impl DataConfig {
    /// Full path of the file backing a source.
    pub fn path_for(&self, source: Source) -> PathBuf {
        let file = match source {
            Source::Crm => &self.customers_file,
            Source::Support => &self.tickets_file,
            Source::Analytics => &self.analytics_file,
        };
        self.directory.join(file)
    }
}

/// Log output settings. `RUST_LOG` takes precedence when set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `info` or `udc_runtime=debug,info`.
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

fn default_data_directory() -> PathBuf {
    PathBuf::from("data")
}

fn default_customers_file() -> String {
    "customers.json".to_string()
}

fn default_tickets_file() -> String {
    "support_tickets.json".to_string()
}

fn default_analytics_file() -> String {
    "analytics.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl UdcConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration and resolve relative paths against the file's directory.
    pub fn load_with_context(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = Self::from_file(path)?;

        let base_dir = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        if config.data.directory.is_relative() {
            config.data.directory = base_dir.join(&config.data.directory);
        }

        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_with_context(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.enabled && self.llm.model.trim().is_empty() {
            return Err(ConfigError::Config(
                "llm.model must be set when llm.enabled is true".to_string(),
            ));
        }
        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::Config("llm.timeout_secs must be > 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config = UdcConfig::from_yaml("{}").unwrap();
        assert_eq!(config, UdcConfig::default());
        assert_eq!(config.server.bind_addr(), "127.0.0.1:8000");
        assert_eq!(config.llm.api_key_env, "GROQ_API_KEY");
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
project: acme
server:
  port: 9100
data:
  directory: /srv/udc
  tickets_file: tickets.json
llm:
  enabled: false
"#;
        let config = UdcConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.project.as_deref(), Some("acme"));
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(!config.llm.enabled);
        assert_eq!(
            config.data.path_for(Source::Support),
            PathBuf::from("/srv/udc/tickets.json")
        );
        assert_eq!(
            config.data.path_for(Source::Crm),
            PathBuf::from("/srv/udc/customers.json")
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = UdcConfig::from_yaml("llm:\n  timeout_secs: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Config(_)));
    }

    #[test]
    fn test_load_with_context_resolves_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("udc.yaml");
        fs::write(&path, "data:\n  directory: fixtures\n").unwrap();

        let config = UdcConfig::load_with_context(&path).unwrap();
        assert_eq!(config.data.directory, dir.path().join("fixtures"));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = UdcConfig::load_or_default(dir.path().join("missing.yaml")).unwrap();
        assert_eq!(config, UdcConfig::default());
    }
}
