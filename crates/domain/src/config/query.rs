use crate::RecordType;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    /// Deadline for one exchange (send + single response datagram).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Upper bound on concurrently running lookups.
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,

    /// Forward lookup mode: "A" or "AAAA".
    #[serde(default = "default_record_type")]
    pub record_type: String,
}

impl QueryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn forward_type(&self) -> Option<RecordType> {
        self.record_type
            .parse::<RecordType>()
            .ok()
            .filter(RecordType::is_forward_type)
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_in_flight: default_max_in_flight(),
            record_type: default_record_type(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_max_in_flight() -> usize {
    64
}

fn default_record_type() -> String {
    "A".to_string()
}
