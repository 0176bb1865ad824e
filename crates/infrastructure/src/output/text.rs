use ferrous_lookup_application::ports::LookupSink;
use ferrous_lookup_domain::wire::CLASS_IN;
use ferrous_lookup_domain::{DomainError, LookupReport};
use std::fmt::Write as _;
use std::io::{BufWriter, Write};

/// Dig-like blocks: a status line, then one tab-separated line per answer.
pub struct TextSink<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> TextSink<W> {
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

fn class_name(class: u16) -> String {
    if class == CLASS_IN {
        "IN".to_string()
    } else {
        format!("CLASS{}", class)
    }
}

/// Renders a whole report so it reaches the writer in one call.
pub fn render(report: &LookupReport) -> String {
    let mut block = format!(
        ";; {} status: {} id: {}\n",
        report.target, report.status, report.id
    );

    for answer in &report.answers {
        let _ = writeln!(
            block,
            "{}\t{}\t{}\t{}\t{}",
            answer.name,
            answer.ttl,
            class_name(answer.class),
            answer.rtype,
            answer.data
        );
    }

    block
}

impl<W: Write + Send> LookupSink for TextSink<W> {
    fn emit(&mut self, report: &LookupReport) -> Result<(), DomainError> {
        self.writer
            .write_all(render(report).as_bytes())
            .map_err(|e| DomainError::OutputError(e.to_string()))
    }

    fn flush(&mut self) -> Result<(), DomainError> {
        self.writer
            .flush()
            .map_err(|e| DomainError::OutputError(e.to_string()))
    }
}
