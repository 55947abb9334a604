use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::inspector::InspectorConfig;
use super::logging::{LogFormat, LoggingConfig, LOG_LEVELS};
use super::output::{OutputConfig, OutputFormat};
use super::redirect::RedirectConfig;

const LOCAL_CONFIG_PATH: &str = "ferrous-dnswire.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-dnswire/config.toml";

/// Main configuration structure for Ferrous DNSWire
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Packet inspection behaviour
    #[serde(default)]
    pub inspector: InspectorConfig,

    /// Query redirection (destination rewrite)
    #[serde(default)]
    pub redirect: RedirectConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Observation output
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-dnswire.toml in current directory
    /// 3. /etc/ferrous-dnswire/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
        if let Some(format) = overrides.output_format {
            self.output.format = format;
        }
        if let Some(target) = overrides.redirect_ipv4 {
            self.redirect.enabled = true;
            self.redirect.ipv4_target = Some(target);
        }
        if let Some(target) = overrides.redirect_ipv6 {
            self.redirect.enabled = true;
            self.redirect.ipv6_target = Some(target);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Invalid log level '{}'. Expected one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        self.redirect.validate()
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub output_format: Option<OutputFormat>,
    pub redirect_ipv4: Option<String>,
    pub redirect_ipv6: Option<String>,
}
