//! Error types for the proxyscan-rs library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for proxyscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading targets or driving the external scanner.
#[derive(Error, Debug)]
pub enum Error {
    /// The target list file does not exist.
    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The target list file exists but could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The external command could not be executed at all.
    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        source: std::io::Error,
    },

    /// The discovery-stage scan exited non-zero for a target.
    #[error("Error scanning {target} for open ports: {stderr}")]
    DiscoveryFailed { target: String, stderr: String },

    /// The service-detection stage exited non-zero for a target.
    #[error("Error getting service info for {target}: {stderr}")]
    ServiceFailed { target: String, stderr: String },
}
