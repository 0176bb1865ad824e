//! UDP transport (RFC 1035 §4.2.1)
//!
//! Each session binds its own ephemeral socket and connects it to the
//! resolver, so the kernel drops datagrams from any other source.
//! Messages are sent as-is (no framing). No TCP fallback on TC.

use async_trait::async_trait;
use ferrous_lookup_application::ports::{DnsTransport, TransportSession};
use ferrous_lookup_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::debug;

/// DNS over UDP to a single resolver.
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    fn transport_error(&self, action: &str, e: std::io::Error) -> DomainError {
        DomainError::Transport {
            server: self.server_addr.to_string(),
            reason: format!("{}: {}", action, e),
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn open(&self) -> Result<Box<dyn TransportSession>, DomainError> {
        // Ephemeral port, same family as the resolver
        let bind_addr = if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.transport_error("failed to bind UDP socket", e))?;

        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| self.transport_error("failed to connect UDP socket", e))?;

        Ok(Box::new(UdpSession {
            socket,
            server_addr: self.server_addr,
        }))
    }

    fn server(&self) -> String {
        self.server_addr.to_string()
    }
}

/// One connected socket; closed when dropped.
pub struct UdpSession {
    socket: UdpSocket,
    server_addr: SocketAddr,
}

impl UdpSession {
    fn transport_error(&self, action: &str, e: std::io::Error) -> DomainError {
        DomainError::Transport {
            server: self.server_addr.to_string(),
            reason: format!("{}: {}", action, e),
        }
    }
}

#[async_trait]
impl TransportSession for UdpSession {
    async fn send(&mut self, message: &[u8]) -> Result<usize, DomainError> {
        let bytes_sent = self
            .socket
            .send(message)
            .await
            .map_err(|e| self.transport_error("failed to send UDP query", e))?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");
        Ok(bytes_sent)
    }

    async fn recv(&mut self, buf: &mut [u8]) -> Result<usize, DomainError> {
        let bytes_received = self
            .socket
            .recv(buf)
            .await
            .map_err(|e| self.transport_error("failed to receive UDP response", e))?;

        debug!(server = %self.server_addr, bytes_received, "UDP response received");
        Ok(bytes_received)
    }
}
