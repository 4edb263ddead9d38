use async_trait::async_trait;
use dns2host_application::ports::DnsExchanger;
use dns2host_domain::{DnsMessage, DomainError, RecordType};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeCall {
    pub server: SocketAddr,
    pub name: String,
    pub record_type: RecordType,
    pub timeout: Duration,
}

type Key = (String, RecordType);

/// Replies from a script keyed by (name, record type); anything unscripted times out.
#[derive(Clone, Default)]
pub struct MockDnsExchanger {
    responses: Arc<RwLock<HashMap<Key, Result<DnsMessage, DomainError>>>>,
    delays: Arc<RwLock<HashMap<Key, Duration>>>,
    panics: Arc<RwLock<HashSet<Key>>>,
    calls: Arc<RwLock<Vec<ExchangeCall>>>,
}

impl MockDnsExchanger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(&self, name: &str, record_type: RecordType, message: DnsMessage) {
        self.responses
            .write()
            .unwrap()
            .insert((name.to_string(), record_type), Ok(message));
    }

    pub fn set_error(&self, name: &str, record_type: RecordType, error: DomainError) {
        self.responses
            .write()
            .unwrap()
            .insert((name.to_string(), record_type), Err(error));
    }

    pub fn set_delay(&self, name: &str, record_type: RecordType, delay: Duration) {
        self.delays
            .write()
            .unwrap()
            .insert((name.to_string(), record_type), delay);
    }

    /// Makes the exchange for (name, record type) panic instead of replying.
    pub fn set_panic(&self, name: &str, record_type: RecordType) {
        self.panics
            .write()
            .unwrap()
            .insert((name.to_string(), record_type));
    }

    pub fn calls(&self) -> Vec<ExchangeCall> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    pub fn queried_names(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.name).collect()
    }
}

#[async_trait]
impl DnsExchanger for MockDnsExchanger {
    async fn exchange(
        &self,
        server: SocketAddr,
        name: &str,
        record_type: RecordType,
        timeout: Duration,
    ) -> Result<DnsMessage, DomainError> {
        self.calls.write().unwrap().push(ExchangeCall {
            server,
            name: name.to_string(),
            record_type,
            timeout,
        });

        let key = (name.to_string(), record_type);
        let should_panic = self.panics.read().unwrap().contains(&key);
        if should_panic {
            panic!("scripted exchange failure for {}", name);
        }

        let delay = self.delays.read().unwrap().get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self.responses.read().unwrap().get(&key).cloned();
        scripted.unwrap_or_else(|| Err(DomainError::transport_timeout("i/o timeout")))
    }
}
