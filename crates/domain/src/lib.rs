//! Ferrous Lookup Domain Layer
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod lookup_report;
pub mod lookup_target;
pub mod wire;

pub use config::{CliOverrides, Config, ConfigError, OutputFormat};
pub use dns_record::{RecordData, RecordType, ResourceRecord};
pub use errors::DomainError;
pub use lookup_report::{LookupReport, ReportAnswer, ReportFlags, ReportQuestion};
pub use lookup_target::{is_reserved, reverse_name, LookupTarget};
pub use wire::{Query, Response, ResponseCode};
