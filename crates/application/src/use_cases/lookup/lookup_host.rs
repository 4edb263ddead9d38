use super::ResolveNameUseCase;
use dns2host_domain::DomainError;
use std::net::IpAddr;
use std::sync::Arc;

/// Entry point for host lookups against an explicit resolver.
pub struct LookupHostUseCase {
    resolver: Arc<ResolveNameUseCase>,
}

impl LookupHostUseCase {
    pub fn new(resolver: Arc<ResolveNameUseCase>) -> Self {
        Self { resolver }
    }

    /// Resolves `host` to textual addresses using the resolver at `server`.
    ///
    /// The empty host is always rejected, and a host that is already an IP
    /// literal is returned unchanged without touching the network.
    pub async fn execute(&self, server: &str, host: &str) -> Result<Vec<String>, DomainError> {
        if host.is_empty() {
            return Err(DomainError::NoSuchHost(String::new()));
        }
        if host.parse::<IpAddr>().is_ok() {
            return Ok(vec![host.to_string()]);
        }
        self.resolver.lookup_host(server, host).await
    }

    pub async fn execute_ip(&self, server: &str, host: &str) -> Result<Vec<IpAddr>, DomainError> {
        if host.is_empty() {
            return Err(DomainError::NoSuchHost(String::new()));
        }
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(vec![ip]);
        }
        self.resolver.lookup_ip(server, host).await
    }
}
