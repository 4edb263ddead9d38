//! UDP transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). Without EDNS(0) a reply is at most
//! 512 bytes; a longer answer comes back with the TC bit set and the caller
//! may retry over TCP.

use super::{op_error, op_timeout, until};
use dns2host_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::debug;

/// Maximum UDP DNS message size without EDNS(0)
const MAX_UDP_MESSAGE_SIZE: usize = 512;

/// A UDP socket connected to one resolver.
#[derive(Debug)]
pub struct UdpConnection {
    socket: UdpSocket,
    server_addr: SocketAddr,
}

impl UdpConnection {
    pub async fn connect(
        server_addr: SocketAddr,
        deadline: Option<Instant>,
    ) -> Result<Self, DomainError> {
        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr: SocketAddr = if server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| op_error("dial", "udp", server_addr, e))?;

        // Connecting filters out datagrams from any other peer.
        until(deadline, socket.connect(server_addr))
            .await
            .ok_or_else(|| op_timeout("dial", "udp", server_addr))?
            .map_err(|e| op_error("dial", "udp", server_addr, e))?;

        Ok(Self {
            socket,
            server_addr,
        })
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    pub async fn send(
        &mut self,
        message_bytes: &[u8],
        deadline: Option<Instant>,
    ) -> Result<(), DomainError> {
        let bytes_sent = until(deadline, self.socket.send(message_bytes))
            .await
            .ok_or_else(|| op_timeout("write", "udp", self.server_addr))?
            .map_err(|e| op_error("write", "udp", self.server_addr, e))?;

        debug!(server = %self.server_addr, bytes_sent = bytes_sent, "UDP query sent");
        Ok(())
    }

    pub async fn recv(&mut self, deadline: Option<Instant>) -> Result<Vec<u8>, DomainError> {
        let mut recv_buf = vec![0u8; MAX_UDP_MESSAGE_SIZE];

        let bytes_received = until(deadline, self.socket.recv(&mut recv_buf))
            .await
            .ok_or_else(|| op_timeout("read", "udp", self.server_addr))?
            .map_err(|e| op_error("read", "udp", self.server_addr, e))?;

        recv_buf.truncate(bytes_received);

        debug!(server = %self.server_addr, bytes_received = bytes_received, "UDP response received");
        Ok(recv_buf)
    }
}
