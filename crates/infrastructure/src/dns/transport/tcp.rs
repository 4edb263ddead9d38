use super::{op_error, op_timeout, until};
use dns2host_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::Instant;
use tracing::debug;

/// A TCP stream to one resolver, carrying length-prefixed messages (RFC 1035 §4.2.2).
#[derive(Debug)]
pub struct TcpConnection {
    stream: TcpStream,
    server_addr: SocketAddr,
}

impl TcpConnection {
    pub async fn connect(
        server_addr: SocketAddr,
        deadline: Option<Instant>,
    ) -> Result<Self, DomainError> {
        let stream = until(deadline, TcpStream::connect(server_addr))
            .await
            .ok_or_else(|| op_timeout("dial", "tcp", server_addr))?
            .map_err(|e| op_error("dial", "tcp", server_addr, e))?;

        stream
            .set_nodelay(true)
            .map_err(|e| op_error("dial", "tcp", server_addr, e))?;

        Ok(Self {
            stream,
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
        let server_addr = self.server_addr;
        until(deadline, send_with_length_prefix(&mut self.stream, message_bytes))
            .await
            .ok_or_else(|| op_timeout("write", "tcp", server_addr))?
            .map_err(|e| op_error("write", "tcp", server_addr, e))?;

        debug!(server = %server_addr, message_len = message_bytes.len(), "TCP query sent");
        Ok(())
    }

    pub async fn recv(&mut self, deadline: Option<Instant>) -> Result<Vec<u8>, DomainError> {
        let server_addr = self.server_addr;
        let response = until(deadline, read_with_length_prefix(&mut self.stream))
            .await
            .ok_or_else(|| op_timeout("read", "tcp", server_addr))?
            .map_err(|e| op_error("read", "tcp", server_addr, e))?;

        debug!(server = %server_addr, response_len = response.len(), "TCP response received");
        Ok(response)
    }
}

pub(crate) async fn send_with_length_prefix<S>(stream: &mut S, message_bytes: &[u8]) -> io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("message of {} bytes exceeds TCP frame", message_bytes.len()),
        )
    })?;

    stream.write_all(&length.to_be_bytes()).await?;
    stream.write_all(message_bytes).await?;
    stream.flush().await
}

pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> io::Result<Vec<u8>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let mut response = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    stream.read_exact(&mut response).await?;

    Ok(response)
}
