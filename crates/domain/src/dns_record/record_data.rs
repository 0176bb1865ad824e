use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Interpreted rdata of a resource record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    /// Decompressed domain name carried by NS, CNAME and PTR records.
    Name(String),
    /// Unknown types, or known types whose rdata has the wrong length.
    Raw(Vec<u8>),
}

impl RecordData {
    pub fn from_ipv4_bytes(rdata: &[u8]) -> Self {
        match <[u8; 4]>::try_from(rdata) {
            Ok(octets) => RecordData::A(Ipv4Addr::from(octets)),
            Err(_) => RecordData::Raw(rdata.to_vec()),
        }
    }

    pub fn from_ipv6_bytes(rdata: &[u8]) -> Self {
        match <[u8; 16]>::try_from(rdata) {
            Ok(octets) => RecordData::Aaaa(Ipv6Addr::from(octets)),
            Err(_) => RecordData::Raw(rdata.to_vec()),
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(addr) => write!(f, "{}", addr),
            RecordData::Aaaa(addr) => write!(f, "{}", addr),
            RecordData::Name(name) if name.is_empty() => f.write_str("."),
            RecordData::Name(name) => f.write_str(name),
            RecordData::Raw(bytes) => f.write_str(&STANDARD.encode(bytes)),
        }
    }
}
