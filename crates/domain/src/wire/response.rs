use super::{read_u16, read_u32, Header, NameDecoder, Query, Question, ResponseCode, HEADER_LEN};
use crate::{DomainError, RecordData, RecordType, ResourceRecord};
use tracing::debug;

/// type + class + ttl + rdlength
const RECORD_FIXED_LEN: usize = 10;

/// A decoded response: header, echoed question and answers in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub header: Header,
    pub question: Question,
    pub answers: Vec<ResourceRecord>,
}

impl Response {
    pub fn decode(message: &[u8]) -> Result<Self, DomainError> {
        let header = Header::decode(message)?;

        debug!(
            id = %format_args!("0x{:04x}", header.id),
            status = %header.rcode(),
            answers = header.answer_count,
            truncated = header.truncated(),
            "Response status"
        );

        if header.question_count != 1 {
            return Err(DomainError::UnexpectedQuestionCount(header.question_count));
        }

        let mut decoder = NameDecoder::new(message);
        let (question, offset) = Question::decode(&mut decoder, HEADER_LEN)?;
        let (answers, _) = decode_answers(&mut decoder, offset, header.answer_count)?;

        Ok(Self {
            header,
            question,
            answers,
        })
    }

    pub fn status(&self) -> ResponseCode {
        self.header.rcode()
    }

    /// Rejects responses whose id does not match the query that was sent.
    pub fn ensure_answers(&self, query: &Query) -> Result<(), DomainError> {
        if self.header.id != query.id() {
            return Err(DomainError::IdMismatch {
                expected: query.id(),
                received: self.header.id,
            });
        }
        Ok(())
    }
}

/// Decodes `count` resource records starting at `offset`.
///
/// Fails with [`DomainError::TruncatedMessage`] when fewer than `count`
/// complete records are present. Returns the records and the offset past
/// the last one.
pub fn decode_answers(
    decoder: &mut NameDecoder<'_>,
    offset: usize,
    count: u16,
) -> Result<(Vec<ResourceRecord>, usize), DomainError> {
    let mut records = Vec::with_capacity(count as usize);
    let mut pos = offset;

    for index in 0..count {
        if pos >= decoder.message().len() {
            return Err(DomainError::TruncatedMessage(format!(
                "{} answers declared, only {} present",
                count, index
            )));
        }
        let (record, next) = decode_record(decoder, pos)?;
        records.push(record);
        pos = next;
    }

    Ok((records, pos))
}

fn decode_record(
    decoder: &mut NameDecoder<'_>,
    offset: usize,
) -> Result<(ResourceRecord, usize), DomainError> {
    let (name, pos) = decoder.read_name(offset)?;
    let message = decoder.message();

    if pos + RECORD_FIXED_LEN > message.len() {
        return Err(DomainError::TruncatedMessage(format!(
            "record '{}' at offset {} is missing its fixed fields",
            name, offset
        )));
    }

    let rtype = RecordType::from_u16(read_u16(message, pos).unwrap_or_default());
    let rclass = read_u16(message, pos + 2).unwrap_or_default();
    let ttl = read_u32(message, pos + 4).unwrap_or_default();
    let rdlength = read_u16(message, pos + 8).unwrap_or_default();

    let rdata_start = pos + RECORD_FIXED_LEN;
    let rdata_end = rdata_start + rdlength as usize;
    let rdata = message.get(rdata_start..rdata_end).ok_or_else(|| {
        DomainError::TruncatedMessage(format!(
            "record '{}' declares {} bytes of data, {} available",
            name,
            rdlength,
            message.len().saturating_sub(rdata_start)
        ))
    })?;

    let data = match rtype {
        RecordType::A => RecordData::from_ipv4_bytes(rdata),
        RecordType::AAAA => RecordData::from_ipv6_bytes(rdata),
        t if t.carries_name() => {
            // Labels must stay inside the rdata; only a pointer may leave it.
            let (target, end) = decoder.read_name(rdata_start)?;
            if end > rdata_end {
                return Err(DomainError::MalformedName(format!(
                    "{} data of record '{}' runs {} bytes past its declared length {}",
                    rtype,
                    name,
                    end - rdata_end,
                    rdlength
                )));
            }
            RecordData::Name(target)
        }
        _ => RecordData::Raw(rdata.to_vec()),
    };

    Ok((
        ResourceRecord {
            name,
            rtype,
            rclass,
            ttl,
            rdlength,
            rdata: rdata.to_vec(),
            data,
        },
        rdata_end,
    ))
}
