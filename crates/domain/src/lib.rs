//! dns2host domain layer
pub mod config;
pub mod dns_message;
pub mod dns_record;
pub mod domain_name;
pub mod errors;
pub mod network;

pub use config::{CliOverrides, Config, ConfigError, ResolverConfig, DNS_PORT};
pub use dns_message::{Answer, DnsMessage, ResponseCode};
pub use dns_record::{RecordData, RecordType, ResourceRecord, DNS_CLASS_IN};
pub use errors::{DomainError, LookupError};
pub use network::Network;
