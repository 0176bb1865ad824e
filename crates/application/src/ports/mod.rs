mod dns_transport;
mod lookup_sink;

pub use dns_transport::{DnsTransport, TransportSession};
pub use lookup_sink::LookupSink;

// Re-export for convenience
pub use ferrous_lookup_domain::LookupReport;
