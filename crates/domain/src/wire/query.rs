use super::{encode_name, EncodedName, Header, Question, HEADER_LEN};
use crate::{DomainError, RecordType};
use ring::rand::{SecureRandom, SystemRandom};

/// An outgoing single-question query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub header: Header,
    pub question: Question,
    encoded_name: EncodedName,
}

impl Query {
    /// Builds a recursive query with a random id from the system CSPRNG.
    pub fn new(domain: &str, qtype: RecordType) -> Result<Self, DomainError> {
        Self::with_id(domain, qtype, random_query_id()?)
    }

    pub fn with_id(domain: &str, qtype: RecordType, id: u16) -> Result<Self, DomainError> {
        let encoded_name = encode_name(domain)?;
        let name = domain
            .trim_matches(|c: char| c.is_whitespace() || c.is_control())
            .trim_end_matches('.');

        Ok(Self {
            header: Header::query(id),
            question: Question::new(name, qtype),
            encoded_name,
        })
    }

    pub fn id(&self) -> u16 {
        self.header.id
    }

    /// Serializes header, name, type and class into one buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN + self.encoded_name.len() + 4);
        self.header.encode_into(&mut buf);
        self.question.encode_into(&self.encoded_name, &mut buf);
        buf
    }
}

/// Draws a query id from the operating system's secure random source.
///
/// Predictable ids make off-path response spoofing trivial, so a failing
/// source is reported as [`DomainError::EntropyUnavailable`].
pub fn random_query_id() -> Result<u16, DomainError> {
    let mut bytes = [0u8; 2];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| DomainError::EntropyUnavailable("system random source failed".into()))?;
    Ok(u16::from_be_bytes(bytes))
}
