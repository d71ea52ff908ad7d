//! Error types for the category tree normalizer
//!
//! The normalizer itself is total and never fails. These errors come from
//! the edges: reading category snapshots, loading policy files, and
//! encoding the canonical form for fingerprints.

use std::path::PathBuf;

use thiserror::Error;

/// Category tree error types
#[derive(Debug, Error)]
pub enum Error {
    /// A snapshot or policy file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON decoding or encoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Home policy violates its constraints
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),
}

/// Result type alias for category tree operations
pub type Result<T> = std::result::Result<T, Error>;
