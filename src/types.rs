use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Immutable per-run settings shared read-only by every worker.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Path to the proxychains configuration file passed via `-f`.
    pub proxychains_config: PathBuf,
    /// Number of most common ports to probe; `0` means the full 1-65535 range.
    pub top_ports: u32,
    /// Maximum number of targets processed concurrently.
    pub max_workers: usize,
}

/// One identified service on a target's open port.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    pub target: String,
    pub port: String,
    pub service: String,
}

/// Aggregate results for one run.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RunReport {
    pub targets_total: u64,
    pub targets_failed: u64,
    pub services: Vec<ServiceRecord>,
}
