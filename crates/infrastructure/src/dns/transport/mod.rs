pub mod tcp;
pub mod udp;

use dns2host_domain::{DomainError, Network};
use std::future::Future;
use std::net::SocketAddr;
use tokio::time::Instant;

pub use tcp::TcpConnection;
pub use udp::UdpConnection;

/// An open connection to one resolver, scoped to a single exchange.
///
/// Dropping it closes the underlying socket.
#[derive(Debug)]
pub enum DnsConnection {
    Stream(TcpConnection),
    Datagram(UdpConnection),
}

impl DnsConnection {
    pub async fn send(
        &mut self,
        message_bytes: &[u8],
        deadline: Option<Instant>,
    ) -> Result<(), DomainError> {
        match self {
            Self::Stream(c) => c.send(message_bytes, deadline).await,
            Self::Datagram(c) => c.send(message_bytes, deadline).await,
        }
    }

    pub async fn recv(&mut self, deadline: Option<Instant>) -> Result<Vec<u8>, DomainError> {
        match self {
            Self::Stream(c) => c.recv(deadline).await,
            Self::Datagram(c) => c.recv(deadline).await,
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Stream(_) => "TCP",
            Self::Datagram(_) => "UDP",
        }
    }

    pub fn server_addr(&self) -> SocketAddr {
        match self {
            Self::Stream(c) => c.server_addr(),
            Self::Datagram(c) => c.server_addr(),
        }
    }
}

/// Opens a connection to `server` over `network`.
///
/// The server is a socket address, so dialing never triggers a name lookup.
pub async fn dial(
    network: Network,
    server: SocketAddr,
    deadline: Option<Instant>,
) -> Result<DnsConnection, DomainError> {
    if !network.accepts(&server) {
        return Err(DomainError::transport(format!(
            "dial {} {}: address family mismatch",
            network, server
        )));
    }

    if network.is_stream() {
        TcpConnection::connect(server, deadline)
            .await
            .map(DnsConnection::Stream)
    } else {
        UdpConnection::connect(server, deadline)
            .await
            .map(DnsConnection::Datagram)
    }
}

/// Same as [`dial`], with the network given by name.
pub async fn dial_network(
    network: &str,
    server: SocketAddr,
    deadline: Option<Instant>,
) -> Result<DnsConnection, DomainError> {
    dial(network.parse()?, server, deadline).await
}

/// Runs `fut` until `deadline`; `None` when the deadline passed first.
pub(crate) async fn until<F: Future>(deadline: Option<Instant>, fut: F) -> Option<F::Output> {
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, fut).await.ok(),
        None => Some(fut.await),
    }
}

pub(crate) fn op_error(op: &str, proto: &str, server: SocketAddr, err: std::io::Error) -> DomainError {
    DomainError::transport(format!("{} {} {}: {}", op, proto, server, err))
}

pub(crate) fn op_timeout(op: &str, proto: &str, server: SocketAddr) -> DomainError {
    DomainError::transport_timeout(format!("{} {} {}: i/o timeout", op, proto, server))
}
