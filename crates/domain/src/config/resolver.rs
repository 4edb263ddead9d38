use crate::config::errors::ConfigError;
use crate::domain_name::is_domain_name;
use crate::{Network, RecordType};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DNS_PORT: u16 = 53;

/// Settings shared by every query of a lookup.
///
/// A lookup captures one value of this type when it starts and hands the
/// relevant pieces down to each attempt; nothing reads it mid-flight.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Per-attempt deadline in seconds; `0` disables it.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Query types raced for every candidate name.
    #[serde(default = "default_record_types")]
    pub record_types: Vec<RecordType>,

    /// Transports tried in order; a truncated reply moves on to the next one.
    #[serde(default = "default_transports")]
    pub transports: Vec<Network>,

    #[serde(default)]
    pub search: Vec<String>,

    #[serde(default = "default_ndots")]
    pub ndots: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            port: default_port(),
            record_types: default_record_types(),
            transports: default_transports(),
            search: Vec::new(),
            ndots: default_ndots(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_port() -> u16 {
    DNS_PORT
}

fn default_record_types() -> Vec<RecordType> {
    vec![RecordType::A]
}

fn default_transports() -> Vec<Network> {
    vec![Network::Udp]
}

fn default_ndots() -> usize {
    1
}

impl ResolverConfig {
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = secs;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_record_types(mut self, record_types: Vec<RecordType>) -> Self {
        self.record_types = record_types;
        self
    }

    /// Races AAAA queries alongside A.
    pub fn with_ipv6(mut self) -> Self {
        if !self.record_types.contains(&RecordType::AAAA) {
            self.record_types.push(RecordType::AAAA);
        }
        self
    }

    pub fn with_transports(mut self, transports: Vec<Network>) -> Self {
        self.transports = transports;
        self
    }

    /// Retries truncated UDP replies over TCP.
    pub fn with_tcp_fallback(mut self) -> Self {
        if !self.transports.contains(&Network::Tcp) {
            self.transports.push(Network::Tcp);
        }
        self
    }

    pub fn with_search(mut self, search: Vec<String>) -> Self {
        self.search = search;
        self
    }

    pub fn with_ndots(mut self, ndots: usize) -> Self {
        self.ndots = ndots;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Validation(
                "Resolver port cannot be 0".to_string(),
            ));
        }
        if self.record_types.is_empty() {
            return Err(ConfigError::Validation(
                "No record types configured".to_string(),
            ));
        }
        if let Some(rt) = self.record_types.iter().find(|rt| !rt.is_address()) {
            return Err(ConfigError::Validation(format!(
                "Record type {} does not resolve to addresses",
                rt
            )));
        }
        if self.transports.is_empty() {
            return Err(ConfigError::Validation(
                "No transports configured".to_string(),
            ));
        }
        for suffix in &self.search {
            if !is_domain_name(suffix) {
                return Err(ConfigError::Validation(format!(
                    "Invalid search domain: {}",
                    suffix
                )));
            }
        }
        Ok(())
    }
}
