use ferrous_lookup_application::ports::LookupSink;
use ferrous_lookup_domain::{DomainError, LookupReport};
use std::io::{BufWriter, Write};

/// One JSON object per report, newline terminated.
pub struct JsonLinesSink<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    pub fn into_inner(self) -> Result<W, DomainError> {
        self.writer
            .into_inner()
            .map_err(|e| DomainError::OutputError(e.error().to_string()))
    }
}

impl<W: Write + Send> LookupSink for JsonLinesSink<W> {
    fn emit(&mut self, report: &LookupReport) -> Result<(), DomainError> {
        serde_json::to_writer(&mut self.writer, report)
            .map_err(|e| DomainError::OutputError(e.to_string()))?;
        self.writer
            .write_all(b"\n")
            .map_err(|e| DomainError::OutputError(e.to_string()))
    }

    fn flush(&mut self) -> Result<(), DomainError> {
        self.writer
            .flush()
            .map_err(|e| DomainError::OutputError(e.to_string()))
    }
}
