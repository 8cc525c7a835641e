// src/archive/mod.rs
// =============================================================================
// This module handles everything that talks to the web archive.
//
// Submodules:
// - client: the shared HTTP client and endpoint URLs
// - index: lists which robots.txt captures exist for a target
// - snapshot: downloads one capture and extracts its Allow/Disallow paths
// =============================================================================

mod client;
mod index;
mod snapshot;

pub use client::{ArchiveClient, DEFAULT_ARCHIVE_URL};
pub use snapshot::extract_directive_paths;

/// Archive-assigned capture id, e.g. "20200101000000" (YYYYMMDDhhmmss).
/// Lexical order is chronological order.
pub type SnapshotTimestamp = String;
