// src/target.rs
// =============================================================================
// This module turns raw input lines into crawl targets.
//
// A target is always "scheme://host" (plus a port when it is not the default):
// - "example.com"               -> "https://example.com"
// - "http://example.com/a?b=c"  -> "http://example.com"
// - "https://Example.com:8443/" -> "https://example.com:8443"
//
// It also joins a target with a robots.txt path to form a full URL.
// =============================================================================

use crate::error::CrawlError;
use serde::Serialize;
use std::fmt;
use url::Url;

/// A normalized scheme://host string. Never has a path, query or fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Normalizes a raw host or URL into a Target
//
// Input without a scheme is treated as a bare host and gets "https".
// Fails with InvalidUrl when no host can be recovered.
pub fn normalize(raw: &str) -> Result<Target, CrawlError> {
    let trimmed = raw.trim();
    let invalid = |reason: String| CrawlError::InvalidUrl {
        input: raw.to_string(),
        reason,
    };

    if trimmed.is_empty() {
        return Err(invalid("empty input".to_string()));
    }

    // Url::parse would read "localhost:8080" as scheme "localhost",
    // so only an explicit "://" counts as a scheme
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let parsed = Url::parse(&candidate).map_err(|e| invalid(e.to_string()))?;

    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => return Err(invalid("URL has no host".to_string())),
    };

    let normalized = match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    };

    Ok(Target(normalized))
}

// Joins a target with a robots.txt path value
//
// "/admin" and "admin" both become "{target}/admin".
pub fn resolve_path(target: &Target, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", target, path)
    } else {
        format!("{}/{}", target, path)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a newtype?
//    - `struct Target(String)` wraps a String in its own type
//    - A plain String can't be passed where a Target is expected, so every
//      Target has gone through normalize()
//
// 2. Why #[serde(transparent)]?
//    - Serializes the Target as the inner string, not as ["..."]
// -----------------------------------------------------------------------------
