use async_trait::async_trait;
use dns2host_domain::{DnsMessage, DomainError, RecordType};
use std::net::SocketAddr;
use std::time::Duration;

/// One query/response round trip with a resolver.
///
/// Implementations build a fresh query (random id, RD set, one IN question
/// for `name`/`record_type`), send it, and return the decoded reply once its
/// id has been checked against the query. A `timeout` of zero means no
/// deadline.
#[async_trait]
pub trait DnsExchanger: Send + Sync {
    async fn exchange(
        &self,
        server: SocketAddr,
        name: &str,
        record_type: RecordType,
        timeout: Duration,
    ) -> Result<DnsMessage, DomainError>;
}
