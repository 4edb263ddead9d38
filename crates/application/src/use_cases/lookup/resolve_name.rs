use super::TryOneNameUseCase;
use dns2host_domain::domain_name::{is_domain_name, name_list};
use dns2host_domain::{Answer, DomainError, LookupError, ResolverConfig};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Resolves a host name by racing the configured record types for each
/// candidate name until one candidate yields addresses.
pub struct ResolveNameUseCase {
    prober: Arc<TryOneNameUseCase>,
    config: Arc<ResolverConfig>,
}

impl ResolveNameUseCase {
    pub fn new(prober: Arc<TryOneNameUseCase>, config: ResolverConfig) -> Self {
        Self {
            prober,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub async fn lookup_ip(&self, server: &str, host: &str) -> Result<Vec<IpAddr>, DomainError> {
        if !is_domain_name(host) {
            return Err(DomainError::InvalidDomainName(host.to_string()));
        }
        let server_ip: IpAddr = server
            .parse()
            .map_err(|_| DomainError::InvalidResolverAddress(server.to_string()))?;

        let config = Arc::clone(&self.config);
        let target = SocketAddr::new(server_ip, config.port);
        let timeout = config.timeout_duration();
        let fan_out = config.record_types.len();
        let candidates = name_list(host, &config.search, config.ndots);

        debug!(host = %host, server = %target, candidates = ?candidates, "Starting lookup");

        let mut addrs: Vec<IpAddr> = Vec::new();
        let mut last_err: Option<DomainError> = None;

        for fqdn in &candidates {
            let (tx, mut rx) = mpsc::channel::<Result<Answer, DomainError>>(fan_out.max(1));

            for &record_type in &config.record_types {
                let tx = tx.clone();
                let prober = Arc::clone(&self.prober);
                let fqdn = fqdn.clone();
                tokio::spawn(async move {
                    let result = prober.execute(target, &fqdn, record_type, timeout).await;
                    let _ = tx.send(result).await;
                });
            }
            drop(tx);

            for _ in 0..fan_out {
                match rx.recv().await {
                    Some(Ok(answer)) => addrs.extend(answer.addresses()),
                    Some(Err(e)) => last_err = Some(e),
                    None => {
                        warn!(name = %fqdn, "Probe task ended without reporting a result");
                        last_err = Some(
                            LookupError::from_exchange(
                                fqdn.as_str(),
                                target.to_string(),
                                DomainError::transport("lookup task aborted"),
                            )
                            .into(),
                        );
                        break;
                    }
                }
            }

            if !addrs.is_empty() {
                debug!(name = %fqdn, addresses = addrs.len(), "Candidate answered");
                break;
            }
        }

        // Several candidates may have been tried; only the caller's name means anything to them.
        match last_err.as_mut() {
            Some(DomainError::Lookup(err)) => err.name = host.to_string(),
            Some(DomainError::NameTooLong(name)) => *name = host.to_string(),
            _ => {}
        }

        if addrs.is_empty() {
            return Err(last_err.unwrap_or_else(|| {
                LookupError::not_found(host)
                    .with_server(target.to_string())
                    .into()
            }));
        }

        Ok(addrs)
    }

    /// Same as [`lookup_ip`](Self::lookup_ip), rendering each address as text.
    pub async fn lookup_host(&self, server: &str, host: &str) -> Result<Vec<String>, DomainError> {
        let addrs = self.lookup_ip(server, host).await?;
        Ok(addrs.iter().map(IpAddr::to_string).collect())
    }
}
