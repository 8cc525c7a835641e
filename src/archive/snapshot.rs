// src/archive/snapshot.rs
// =============================================================================
// This module downloads one archived robots.txt and pulls the paths out of it.
//
// Only two directives matter here:
//   Disallow: /admin
//   Allow: /public
// Everything else (User-agent, Sitemap, Crawl-delay, comments) is ignored.
// =============================================================================

use super::ArchiveClient;
use crate::error::CrawlError;
use crate::target::{resolve_path, Target};

const DIRECTIVES: [&str; 2] = ["Disallow:", "Allow:"];

impl ArchiveClient {
    // Fetches the verbatim body of one capture
    //
    // Anything other than HTTP 200 counts as unavailable, including redirects
    // the archive did not resolve for us.
    pub async fn fetch_snapshot(
        &self,
        target: &Target,
        timestamp: &str,
    ) -> Result<String, CrawlError> {
        let unavailable = |reason: String| CrawlError::SnapshotUnavailable {
            timestamp: timestamp.to_string(),
            reason,
        };

        let response = self
            .http
            .get(self.snapshot_url(target, timestamp))
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(unavailable(format!("HTTP {}", response.status().as_u16())));
        }

        response.text().await.map_err(|e| unavailable(e.to_string()))
    }
}

// Returns every Allow/Disallow path in a robots.txt body, resolved against target
//
// The path is the first token after the directive keyword, so
// "Disallow: /tmp # old" yields "/tmp". Empty directives ("Disallow:")
// allow everything and carry no path.
pub fn extract_directive_paths(target: &Target, body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter_map(|line| {
            DIRECTIVES
                .iter()
                .find_map(|directive| line.strip_prefix(directive))
        })
        .filter_map(|rest| rest.split_whitespace().next())
        .map(|path| resolve_path(target, path))
        .collect()
}
