//! Stub resolver facade wiring the wire exchanger into the lookup use cases.

use super::exchange::WireExchanger;
use dns2host_application::use_cases::{LookupHostUseCase, ResolveNameUseCase, TryOneNameUseCase};
use dns2host_domain::{DomainError, ResolverConfig};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::info;

/// Resolves host names against an explicitly named resolver.
pub struct StubResolver {
    lookup: LookupHostUseCase,
    resolver: Arc<ResolveNameUseCase>,
}

impl StubResolver {
    pub fn new(config: ResolverConfig) -> Self {
        info!(
            timeout_secs = config.timeout,
            port = config.port,
            record_types = ?config.record_types,
            transports = ?config.transports,
            "Stub resolver initialized"
        );

        let exchanger = Arc::new(WireExchanger::new(config.transports.clone()));
        let prober = Arc::new(TryOneNameUseCase::new(exchanger));
        let resolver = Arc::new(ResolveNameUseCase::new(prober, config));

        Self {
            lookup: LookupHostUseCase::new(Arc::clone(&resolver)),
            resolver,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        self.resolver.config()
    }

    /// Addresses of `host` as text, asking the resolver at `server`.
    pub async fn lookup_host(&self, server: &str, host: &str) -> Result<Vec<String>, DomainError> {
        self.lookup.execute(server, host).await
    }

    pub async fn lookup_ip(&self, server: &str, host: &str) -> Result<Vec<IpAddr>, DomainError> {
        self.lookup.execute_ip(server, host).await
    }
}

impl Default for StubResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

/// Looks up `host` using the default settings: IPv4 only, UDP, a 10 second
/// timeout and port 53.
pub async fn lookup_host(server: &str, host: &str) -> Result<Vec<String>, DomainError> {
    StubResolver::default().lookup_host(server, host).await
}

pub async fn lookup_ip(server: &str, host: &str) -> Result<Vec<IpAddr>, DomainError> {
    StubResolver::default().lookup_ip(server, host).await
}
