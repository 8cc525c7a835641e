// src/error.rs
// =============================================================================
// Error kinds shared by the normalizer and the archive client.
//
// Policy:
// - InvalidUrl: the input line is skipped, the run continues
// - IndexUnavailable / IndexFormat: fatal, the process exits non-zero
// - SnapshotUnavailable: expected and frequent, the snapshot contributes
//   no paths and never leaves the worker as an error
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// Raw input could not be turned into a scheme://host target
    #[error("invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    /// The snapshot index could not be reached or answered with an error status
    #[error("snapshot index unavailable for {target}: {reason}")]
    IndexUnavailable { target: String, reason: String },

    /// The snapshot index answered with something that is not a table of rows
    #[error("unexpected snapshot index response for {target}: {source}")]
    IndexFormat {
        target: String,
        #[source]
        source: serde_json::Error,
    },

    /// One archived capture could not be retrieved
    #[error("snapshot {timestamp} unavailable: {reason}")]
    SnapshotUnavailable { timestamp: String, reason: String },

    /// The HTTP transport could not be built
    #[error("failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
