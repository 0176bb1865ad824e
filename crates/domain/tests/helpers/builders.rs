#![allow(dead_code)]

/// Hand-assembles DNS messages byte by byte, so tests can lay out
/// compression pointers and truncations exactly.
pub struct WireBuilder {
    buf: Vec<u8>,
}

impl WireBuilder {
    pub fn header(id: u16, flags: u16, qdcount: u16, ancount: u16) -> Self {
        let mut buf = Vec::with_capacity(512);
        for field in [id, flags, qdcount, ancount, 0, 0] {
            buf.extend_from_slice(&field.to_be_bytes());
        }
        Self { buf }
    }

    /// Standard NOERROR response header (QR, RD, RA set).
    pub fn response(id: u16, ancount: u16) -> Self {
        Self::header(id, 0x8180, 1, ancount)
    }

    pub fn offset(&self) -> u16 {
        self.buf.len() as u16
    }

    pub fn name(mut self, name: &str) -> Self {
        for label in name.split('.').filter(|l| !l.is_empty()) {
            self.buf.push(label.len() as u8);
            self.buf.extend_from_slice(label.as_bytes());
        }
        self.buf.push(0);
        self
    }

    /// Labels followed by a compression pointer instead of the root label.
    pub fn labels_then_pointer(mut self, labels: &str, target: u16) -> Self {
        for label in labels.split('.').filter(|l| !l.is_empty()) {
            self.buf.push(label.len() as u8);
            self.buf.extend_from_slice(label.as_bytes());
        }
        self.pointer(target)
    }

    pub fn pointer(mut self, target: u16) -> Self {
        self.buf.push(0xC0 | (target >> 8) as u8);
        self.buf.push(target as u8);
        self
    }

    pub fn question(self, name: &str, qtype: u16) -> Self {
        self.name(name).u16(qtype).u16(1)
    }

    /// type, class IN, ttl and rdlength of a record whose name was just written.
    pub fn record_fields(self, rtype: u16, ttl: u32, rdlength: u16) -> Self {
        self.u16(rtype).u16(1).u32(ttl).u16(rdlength)
    }

    pub fn u16(mut self, value: u16) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn u32(mut self, value: u32) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}
