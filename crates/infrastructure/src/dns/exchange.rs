use super::codec::{MessageBuilder, ResponseParser};
use super::transport::dial;
use async_trait::async_trait;
use dns2host_application::ports::DnsExchanger;
use dns2host_domain::{DnsMessage, DomainError, Network, RecordType};
use std::net::SocketAddr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::Instant;
use tracing::debug;

/// Sends one query over each configured transport in turn and returns the
/// first complete reply.
pub struct WireExchanger {
    transports: Vec<Network>,
}

impl WireExchanger {
    pub fn new(transports: Vec<Network>) -> Self {
        Self { transports }
    }

    pub fn transports(&self) -> &[Network] {
        &self.transports
    }

    async fn exchange_once(
        &self,
        network: Network,
        server: SocketAddr,
        name: &str,
        record_type: RecordType,
        timeout: Duration,
    ) -> Result<DnsMessage, DomainError> {
        // A zero timeout, or one too large to represent, means no deadline at all.
        let deadline = if timeout.is_zero() {
            None
        } else {
            Instant::now().checked_add(timeout)
        };

        let mut conn = dial(network, server, deadline).await?;

        let id = transaction_id();
        let query = MessageBuilder::build_query(id, name, record_type)?;
        conn.send(&query, deadline).await?;

        let reply = conn.recv(deadline).await?;
        let message = ResponseParser::parse(&reply)?;

        if message.id != id {
            return Err(DomainError::IdMismatch {
                sent: id,
                received: message.id,
            });
        }

        Ok(message)
    }
}

impl Default for WireExchanger {
    fn default() -> Self {
        Self::new(vec![Network::Udp])
    }
}

#[async_trait]
impl DnsExchanger for WireExchanger {
    async fn exchange(
        &self,
        server: SocketAddr,
        name: &str,
        record_type: RecordType,
        timeout: Duration,
    ) -> Result<DnsMessage, DomainError> {
        for &network in &self.transports {
            let message = self
                .exchange_once(network, server, name, record_type, timeout)
                .await?;

            if message.truncated {
                debug!(
                    name = %name,
                    server = %server,
                    network = %network,
                    "Truncated reply, trying next transport"
                );
                continue;
            }

            return Ok(message);
        }

        Err(DomainError::ExhaustedTransports)
    }
}

/// Pseudo-random id mixed with the clock so concurrent queries rarely collide.
fn transaction_id() -> u16 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();
    fastrand::u16(..) ^ (nanos as u16)
}
