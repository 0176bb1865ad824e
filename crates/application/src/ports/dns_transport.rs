use async_trait::async_trait;
use ferrous_lookup_domain::DomainError;

/// Opens datagram sessions to the configured resolver.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// Opens a fresh session. Sessions are never shared between lookups and
    /// are released when dropped.
    async fn open(&self) -> Result<Box<dyn TransportSession>, DomainError>;

    /// Resolver address, for logs and error messages.
    fn server(&self) -> String;
}

/// A duplex datagram channel to one resolver.
#[async_trait]
pub trait TransportSession: Send {
    async fn send(&mut self, message: &[u8]) -> Result<usize, DomainError>;

    /// Reads a single datagram into `buf`, returning its length.
    async fn recv(&mut self, buf: &mut [u8]) -> Result<usize, DomainError>;
}
