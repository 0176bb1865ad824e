use super::{MAX_LABEL_LEN, MAX_NAME_LEN};
use crate::DomainError;
use smallvec::SmallVec;
use std::collections::HashMap;
use tracing::trace;

/// Longest pointer chain followed before a name is rejected.
const MAX_POINTER_HOPS: usize = 64;

const POINTER_MASK: u8 = 0xC0;

/// A domain name in wire form: length-prefixed labels ending in the root label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedName(Vec<u8>);

impl EncodedName {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Encodes `domain` into wire form.
///
/// Surrounding whitespace and control characters are ignored, as are empty
/// segments (so `"example.com."` and `"example.com"` encode identically).
/// A label longer than 63 bytes is an error rather than being dropped.
pub fn encode_name(domain: &str) -> Result<EncodedName, DomainError> {
    let cleaned = domain.trim_matches(|c: char| c.is_whitespace() || c.is_control());
    let mut buf = Vec::with_capacity(cleaned.len() + 2);

    for label in cleaned.split('.').filter(|label| !label.is_empty()) {
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::OversizedLabel {
                label: label.to_string(),
                length: label.len(),
            });
        }
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0);

    if buf.len() > MAX_NAME_LEN {
        return Err(DomainError::NameTooLong(buf.len()));
    }

    Ok(EncodedName(buf))
}

/// Decodes names out of one message, following compression pointers
/// (RFC 1035 §4.1.4) at any label boundary.
///
/// Every name start offset is resolved at most once per message; later
/// lookups of the same offset are served from a per-message cache.
pub struct NameDecoder<'a> {
    message: &'a [u8],
    cache: HashMap<usize, (String, usize)>,
    resolutions: usize,
    cache_hits: usize,
}

impl<'a> NameDecoder<'a> {
    pub fn new(message: &'a [u8]) -> Self {
        Self {
            message,
            cache: HashMap::new(),
            resolutions: 0,
            cache_hits: 0,
        }
    }

    pub fn message(&self) -> &'a [u8] {
        self.message
    }

    /// Number of distinct offsets actually walked.
    pub fn resolutions(&self) -> usize {
        self.resolutions
    }

    /// Number of lookups answered from the cache.
    pub fn cache_hits(&self) -> usize {
        self.cache_hits
    }

    /// Reads the name starting at `offset`.
    ///
    /// Returns the dotted name (no trailing dot, empty for the root) and the
    /// offset just past the name as it is laid out at `offset`.
    pub fn read_name(&mut self, offset: usize) -> Result<(String, usize), DomainError> {
        let mut chain: SmallVec<[usize; 8]> = SmallVec::new();
        self.resolve(offset, &mut chain)
    }

    fn resolve(
        &mut self,
        start: usize,
        chain: &mut SmallVec<[usize; 8]>,
    ) -> Result<(String, usize), DomainError> {
        if let Some((name, end)) = self.cache.get(&start) {
            self.cache_hits += 1;
            return Ok((name.clone(), *end));
        }

        if chain.contains(&start) {
            return Err(DomainError::MalformedName(format!(
                "compression loop through offset {}",
                start
            )));
        }
        if chain.len() >= MAX_POINTER_HOPS {
            return Err(DomainError::MalformedName(format!(
                "more than {} compression pointers",
                MAX_POINTER_HOPS
            )));
        }
        chain.push(start);

        let message = self.message;

        let mut name = String::new();
        let mut wire_len = 0usize;
        let mut pos = start;

        let end = loop {
            let len_byte = *message.get(pos).ok_or_else(|| {
                DomainError::MalformedName(format!(
                    "no terminator for name at offset {} (message is {} bytes)",
                    start,
                    message.len()
                ))
            })?;

            if len_byte == 0 {
                break pos + 1;
            }

            match len_byte & POINTER_MASK {
                0x00 => {
                    let len = len_byte as usize;
                    let label = message.get(pos + 1..pos + 1 + len).ok_or_else(|| {
                        DomainError::MalformedName(format!(
                            "label at offset {} runs past the end of the message",
                            pos
                        ))
                    })?;

                    wire_len += 1 + len;
                    if wire_len + 1 > MAX_NAME_LEN {
                        return Err(DomainError::NameTooLong(wire_len + 1));
                    }

                    if !name.is_empty() {
                        name.push('.');
                    }
                    name.push_str(&String::from_utf8_lossy(label));
                    pos += 1 + len;
                }
                POINTER_MASK => {
                    let low = *message.get(pos + 1).ok_or_else(|| {
                        DomainError::MalformedName(format!(
                            "compression pointer at offset {} is cut short",
                            pos
                        ))
                    })?;
                    let target = (((len_byte & !POINTER_MASK) as usize) << 8) | low as usize;

                    if target >= message.len() {
                        return Err(DomainError::MalformedName(format!(
                            "compression pointer to offset {} beyond message length {}",
                            target,
                            message.len()
                        )));
                    }

                    trace!(from = pos, to = target, "Following compression pointer");
                    let (suffix, _) = self.resolve(target, chain)?;

                    if wire_len + suffix.len() + 2 > MAX_NAME_LEN {
                        return Err(DomainError::NameTooLong(wire_len + suffix.len() + 2));
                    }
                    if !suffix.is_empty() {
                        if !name.is_empty() {
                            name.push('.');
                        }
                        name.push_str(&suffix);
                    }
                    break pos + 2;
                }
                other => {
                    return Err(DomainError::MalformedName(format!(
                        "unsupported label type 0x{:02x} at offset {}",
                        other, pos
                    )));
                }
            }
        };

        chain.pop();
        self.resolutions += 1;
        self.cache.insert(start, (name.clone(), end));
        Ok((name, end))
    }
}
