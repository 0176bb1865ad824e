use super::{RecordData, RecordType};

/// One answer entry of a decoded response, in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub rtype: RecordType,
    pub rclass: u16,
    pub ttl: u32,
    pub rdlength: u16,
    pub rdata: Vec<u8>,
    pub data: RecordData,
}

impl ResourceRecord {
    /// Human-readable rendering of the rdata.
    pub fn render_data(&self) -> String {
        self.data.to_string()
    }
}
