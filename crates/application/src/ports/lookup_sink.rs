use ferrous_lookup_domain::{DomainError, LookupReport};

/// Destination for rendered reports.
///
/// A sink is owned by a single writer task; lookups never write to it
/// directly.
pub trait LookupSink: Send {
    fn emit(&mut self, report: &LookupReport) -> Result<(), DomainError>;

    fn flush(&mut self) -> Result<(), DomainError> {
        Ok(())
    }
}
