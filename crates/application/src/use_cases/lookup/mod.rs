mod lookup_targets;

pub use lookup_targets::{LookupOptions, LookupSummary, LookupTargetsUseCase};
