use super::{read_u16, EncodedName, NameDecoder, CLASS_IN};
use crate::{DomainError, RecordType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub qtype: RecordType,
    pub qclass: u16,
}

impl Question {
    pub fn new(name: impl Into<String>, qtype: RecordType) -> Self {
        Self {
            name: name.into(),
            qtype,
            qclass: CLASS_IN,
        }
    }

    pub fn encode_into(&self, name: &EncodedName, buf: &mut Vec<u8>) {
        buf.extend_from_slice(name.as_bytes());
        buf.extend_from_slice(&self.qtype.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.qclass.to_be_bytes());
    }

    /// Decodes the echoed question starting at `offset`.
    ///
    /// Returns the question and the offset just past the question section.
    pub fn decode(
        decoder: &mut NameDecoder<'_>,
        offset: usize,
    ) -> Result<(Self, usize), DomainError> {
        let (name, pos) = decoder.read_name(offset)?;
        let message = decoder.message();

        let (qtype, qclass) = match (read_u16(message, pos), read_u16(message, pos + 2)) {
            (Some(qtype), Some(qclass)) => (qtype, qclass),
            _ => {
                return Err(DomainError::TruncatedMessage(format!(
                    "question type/class need 4 bytes at offset {}, message is {} bytes",
                    pos,
                    message.len()
                )))
            }
        };

        Ok((
            Self {
                name,
                qtype: RecordType::from_u16(qtype),
                qclass,
            },
            pos + 4,
        ))
    }
}
