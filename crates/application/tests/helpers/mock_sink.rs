#![allow(dead_code)]

use ferrous_lookup_application::ports::LookupSink;
use ferrous_lookup_domain::{DomainError, LookupReport};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct CollectingSink {
    reports: Arc<Mutex<Vec<LookupReport>>>,
    flushed: Arc<Mutex<bool>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxed(&self) -> Box<dyn LookupSink> {
        Box::new(self.clone())
    }

    pub fn reports(&self) -> Vec<LookupReport> {
        self.reports.lock().unwrap().clone()
    }

    pub fn was_flushed(&self) -> bool {
        *self.flushed.lock().unwrap()
    }
}

impl LookupSink for CollectingSink {
    fn emit(&mut self, report: &LookupReport) -> Result<(), DomainError> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DomainError> {
        *self.flushed.lock().unwrap() = true;
        Ok(())
    }
}

/// Sink whose writes fail for chosen targets, and optionally on flush.
#[derive(Clone, Default)]
pub struct FailingSink {
    inner: CollectingSink,
    failing_targets: Arc<Mutex<Vec<String>>>,
    fail_flush: bool,
}

impl FailingSink {
    pub fn failing_on(targets: &[&str]) -> Self {
        Self {
            failing_targets: Arc::new(Mutex::new(
                targets.iter().map(|t| t.to_string()).collect(),
            )),
            ..Self::default()
        }
    }

    pub fn failing_flush() -> Self {
        Self {
            fail_flush: true,
            ..Self::default()
        }
    }

    pub fn boxed(&self) -> Box<dyn LookupSink> {
        Box::new(self.clone())
    }

    pub fn reports(&self) -> Vec<LookupReport> {
        self.inner.reports()
    }
}

impl LookupSink for FailingSink {
    fn emit(&mut self, report: &LookupReport) -> Result<(), DomainError> {
        if self.failing_targets.lock().unwrap().contains(&report.target) {
            return Err(DomainError::OutputError("broken pipe".into()));
        }
        self.inner.emit(report)
    }

    fn flush(&mut self) -> Result<(), DomainError> {
        if self.fail_flush {
            return Err(DomainError::OutputError("broken pipe".into()));
        }
        self.inner.flush()
    }
}
