pub mod udp;

use ferrous_lookup_application::ports::DnsTransport;
use ferrous_lookup_domain::config::ResolverConfig;
use std::sync::Arc;

pub use udp::{UdpSession, UdpTransport};

pub fn create_transport(config: &ResolverConfig) -> Arc<dyn DnsTransport> {
    Arc::new(UdpTransport::new(config.socket_addr()))
}
