use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::Path;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::nameserver::NameserverConfig;
use super::resolver::ResolverConfig;

const LOCAL_CONFIG_PATH: &str = "dns2host.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/dns2host/config.toml";

/// Main configuration structure for dns2host
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Resolver queried by default
    #[serde(default)]
    pub nameserver: NameserverConfig,

    /// Query behaviour (timeout, record types, transports, search list)
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dns2host.toml in current directory
    /// 3. /etc/dns2host/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if Path::new(SYSTEM_CONFIG_PATH).exists() {
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
        if let Some(address) = overrides.nameserver {
            self.nameserver.address = address;
        }
        if let Some(timeout) = overrides.timeout {
            self.resolver.timeout = timeout;
        }
        if overrides.ipv6 {
            self.resolver = std::mem::take(&mut self.resolver).with_ipv6();
        }
        if overrides.tcp_fallback {
            self.resolver = std::mem::take(&mut self.resolver).with_tcp_fallback();
        }
        if !overrides.search.is_empty() {
            self.resolver.search = overrides.search;
        }
        if let Some(ndots) = overrides.ndots {
            self.resolver = std::mem::take(&mut self.resolver).with_ndots(ndots);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nameserver.address.parse::<IpAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "Nameserver must be a literal IP address, got: {}",
                self.nameserver.address
            )));
        }
        self.resolver.validate()
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub nameserver: Option<String>,
    pub timeout: Option<u64>,
    pub ipv6: bool,
    pub tcp_fallback: bool,
    pub search: Vec<String>,
    pub ndots: Option<usize>,
    pub log_level: Option<String>,
}
