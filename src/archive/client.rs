// src/archive/client.rs
// =============================================================================
// A small handle around the HTTP client and the archive's base URL.
//
// Endpoints built from the base URL:
// - index:    {base}/cdx/search/cdx
// - snapshot: {base}/web/{timestamp}if_/{target}/robots.txt
//
// The "if_" suffix asks the archive for the capture exactly as it was
// stored, without the archive's own toolbar or link rewriting.
//
// Rust concepts:
// - pub(super): the `http` field is visible to the rest of archive/ only
// - concat!/env!: build the User-Agent string at compile time
// - From: `?` turns a reqwest::Error into CrawlError::HttpClient
// =============================================================================

use crate::error::CrawlError;   // Typed errors for this crate
use crate::target::Target;      // Normalized scheme://host
use reqwest::Client;            // Pooled async HTTP client
use std::time::Duration;        // Per-request timeout

/// Default base URL of the Wayback Machine
pub const DEFAULT_ARCHIVE_URL: &str = "https://web.archive.org";

// Cheap to clone: reqwest::Client is reference counted internally,
// so every worker can own its own copy
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    /// Shared connection pool, used by index.rs and snapshot.rs
    pub(super) http: Client,
    /// Archive base URL without a trailing slash
    base: String,
}

impl ArchiveClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CrawlError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // "https://web.archive.org/" and "https://web.archive.org" build the same URLs
        Ok(Self {
            http,
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn index_url(&self) -> String {
        format!("{}/cdx/search/cdx", self.base)
    }

    pub fn snapshot_url(&self, target: &Target, timestamp: &str) -> String {
        format!("{}/web/{}if_/{}/robots.txt", self.base, timestamp, target.as_str())
    }
}
