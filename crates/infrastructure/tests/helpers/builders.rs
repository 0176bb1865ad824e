#![allow(dead_code)]
use ferrous_lookup_domain::{
    LookupReport, RecordType, ReportAnswer, ReportFlags, ReportQuestion, ResponseCode,
};

pub struct ReportBuilder {
    report: LookupReport,
}

impl ReportBuilder {
    pub fn new(target: &str) -> Self {
        Self {
            report: LookupReport {
                target: target.to_string(),
                id: 0x1234,
                status: ResponseCode::NoError,
                flags: ReportFlags {
                    authoritative: false,
                    truncated: false,
                    recursion_desired: true,
                    recursion_available: true,
                },
                question: ReportQuestion {
                    name: target.to_string(),
                    qtype: RecordType::A,
                    class: 1,
                },
                answers: Vec::new(),
            },
        }
    }

    pub fn status(mut self, status: ResponseCode) -> Self {
        self.report.status = status;
        self
    }

    pub fn answer(mut self, rtype: RecordType, ttl: u32, length: u16, data: &str) -> Self {
        self.report.answers.push(ReportAnswer {
            name: self.report.question.name.clone(),
            rtype,
            class: 1,
            ttl,
            length,
            data: data.to_string(),
        });
        self
    }

    pub fn build(self) -> LookupReport {
        self.report
    }
}

/// Cloneable in-memory writer so a boxed sink's output can be read back.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    inner: std::sync::Arc<std::sync::Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.inner.lock().unwrap().clone()).unwrap()
    }
}

impl std::io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
