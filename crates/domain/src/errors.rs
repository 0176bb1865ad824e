use std::net::IpAddr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Truncated message: {0}")]
    TruncatedMessage(String),

    #[error("Malformed name: {0}")]
    MalformedName(String),

    #[error("Label of {length} bytes exceeds the 63 byte limit: {label}")]
    OversizedLabel { label: String, length: usize },

    #[error("Encoded name of {0} bytes exceeds the 255 byte limit")]
    NameTooLong(usize),

    #[error("Response carries {0} questions, expected exactly one")]
    UnexpectedQuestionCount(u16),

    #[error("Response id mismatch: expected 0x{expected:04x}, received 0x{received:04x}")]
    IdMismatch { expected: u16, received: u16 },

    #[error("Reserved address is not queried: {0}")]
    ReservedAddress(IpAddr),

    #[error("Invalid lookup target: {0}")]
    InvalidTarget(String),

    #[error("Transport error with {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("Transport timeout waiting for {server}")]
    TransportTimeout { server: String },

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Fatal errors abort the whole run instead of a single target.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DomainError::EntropyUnavailable(_))
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            DomainError::Transport { .. } | DomainError::TransportTimeout { .. }
        )
    }
}
