use crate::wire::encode_name;
use crate::{DomainError, RecordType};
use std::fmt::Write;
use std::net::IpAddr;

const REVERSE_V4_SUFFIX: &str = "in-addr.arpa";
const REVERSE_V6_SUFFIX: &str = "ip6.arpa";

/// One classified input: what to ask the resolver for, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTarget {
    /// The input exactly as the operator gave it.
    pub input: String,
    /// Name placed in the question section.
    pub domain: String,
    pub record_type: RecordType,
}

impl LookupTarget {
    /// IP literals become PTR queries under the reverse tree, anything else
    /// a forward query of `forward_type`.
    pub fn classify(input: &str, forward_type: RecordType) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidTarget("empty target".into()));
        }

        if let Ok(ip) = trimmed.parse::<IpAddr>() {
            let ip = ip.to_canonical();
            if is_reserved(&ip) {
                return Err(DomainError::ReservedAddress(ip));
            }
            return Ok(Self {
                input: input.to_string(),
                domain: reverse_name(ip),
                record_type: RecordType::PTR,
            });
        }

        // Oversized labels and names are caught here, before dispatch
        if encode_name(trimmed)?.len() == 1 {
            return Err(DomainError::InvalidTarget(format!(
                "'{}' has no labels",
                trimmed
            )));
        }

        Ok(Self {
            input: input.to_string(),
            domain: trimmed.to_string(),
            record_type: forward_type,
        })
    }

    pub fn is_reverse(&self) -> bool {
        self.record_type == RecordType::PTR
    }
}

/// Loopback, unspecified, link-local and multicast literals are never queried.
pub fn is_reserved(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback() || v4.is_unspecified() || v4.is_link_local() || v4.is_multicast()
        }
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || v6.is_unspecified()
                || v6.is_multicast()
                || (v6.segments()[0] & 0xffc0) == 0xfe80
        }
    }
}

/// Builds the reverse-lookup name for `ip` (RFC 1035 §3.5, RFC 3596 §2.5).
pub fn reverse_name(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, c, d] = v4.octets();
            format!("{}.{}.{}.{}.{}", d, c, b, a, REVERSE_V4_SUFFIX)
        }
        IpAddr::V6(v6) => {
            let mut name = String::with_capacity(16 * 4 + REVERSE_V6_SUFFIX.len());
            for byte in v6.octets().iter().rev() {
                let _ = write!(name, "{:x}.{:x}.", byte & 0x0f, byte >> 4);
            }
            name.push_str(REVERSE_V6_SUFFIX);
            name
        }
    }
}
