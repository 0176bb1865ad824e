mod json;
mod text;

use ferrous_lookup_application::ports::LookupSink;
use ferrous_lookup_domain::OutputFormat;
use std::io::Write;

pub use json::JsonLinesSink;
pub use text::TextSink;

/// Builds the sink for `format` over `writer`.
pub fn create_sink<W>(format: OutputFormat, writer: W) -> Box<dyn LookupSink>
where
    W: Write + Send + 'static,
{
    match format {
        OutputFormat::Json => Box::new(JsonLinesSink::new(writer)),
        OutputFormat::Text => Box::new(TextSink::new(writer)),
    }
}

/// Sink writing to the process's standard output.
pub fn stdout_sink(format: OutputFormat) -> Box<dyn LookupSink> {
    create_sink(format, std::io::stdout())
}
