//! DNS message codec (RFC 1035 §4.1)
//!
//! Encodes single-question queries and decodes the responses a resolver
//! sends back, resolving name compression against the whole message.

mod header;
mod name;
mod query;
mod question;
mod response;
mod response_code;

pub use header::Header;
pub use name::{encode_name, EncodedName, NameDecoder};
pub use query::{random_query_id, Query};
pub use question::Question;
pub use response::{decode_answers, Response};
pub use response_code::ResponseCode;

/// The fixed DNS header is always 12 bytes.
pub const HEADER_LEN: usize = 12;

/// The Internet class.
pub const CLASS_IN: u16 = 1;

pub const MAX_LABEL_LEN: usize = 63;

/// Ceiling for an encoded name, length prefixes and terminator included.
pub const MAX_NAME_LEN: usize = 255;

pub(crate) fn read_u16(buf: &[u8], pos: usize) -> Option<u16> {
    buf.get(pos..pos + 2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
}

pub(crate) fn read_u32(buf: &[u8], pos: usize) -> Option<u32> {
    buf.get(pos..pos + 4)
        .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}
