mod mock_sink;
mod mock_transport;

pub use mock_sink::{CollectingSink, FailingSink};
pub use mock_transport::{Behavior, MockDnsTransport};
