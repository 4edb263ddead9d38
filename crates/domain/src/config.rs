pub mod errors;
pub mod logging;
pub mod nameserver;
pub mod resolver;
pub mod root;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use nameserver::NameserverConfig;
pub use resolver::{ResolverConfig, DNS_PORT};
pub use root::{CliOverrides, Config};
