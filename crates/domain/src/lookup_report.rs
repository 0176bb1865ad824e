use crate::wire::{Response, ResponseCode};
use crate::{RecordType, ResourceRecord};
use serde::Serialize;

/// The structured record emitted for every answered target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupReport {
    pub target: String,
    pub id: u16,
    pub status: ResponseCode,
    pub flags: ReportFlags,
    pub question: ReportQuestion,
    pub answers: Vec<ReportAnswer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportFlags {
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportQuestion {
    pub name: String,
    #[serde(rename = "type")]
    pub qtype: RecordType,
    pub class: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportAnswer {
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: RecordType,
    pub class: u16,
    pub ttl: u32,
    pub length: u16,
    pub data: String,
}

impl From<&ResourceRecord> for ReportAnswer {
    fn from(record: &ResourceRecord) -> Self {
        Self {
            name: record.name.clone(),
            rtype: record.rtype,
            class: record.rclass,
            ttl: record.ttl,
            length: record.rdlength,
            data: record.render_data(),
        }
    }
}

impl LookupReport {
    pub fn from_response(target: impl Into<String>, response: &Response) -> Self {
        let header = &response.header;
        Self {
            target: target.into(),
            id: header.id,
            status: header.rcode(),
            flags: ReportFlags {
                authoritative: header.authoritative(),
                truncated: header.truncated(),
                recursion_desired: header.recursion_desired(),
                recursion_available: header.recursion_available(),
            },
            question: ReportQuestion {
                name: response.question.name.clone(),
                qtype: response.question.qtype,
                class: response.question.qclass,
            },
            answers: response.answers.iter().map(ReportAnswer::from).collect(),
        }
    }
}
