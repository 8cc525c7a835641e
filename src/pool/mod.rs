// src/pool/mod.rs
// =============================================================================
// This module runs the whole pipeline for one target:
//
//   snapshot index -> sampler -> worker pool (parallel) -> aggregator
//
// Submodules:
// - progress: attempt counter and progress bar
// - workers: the fixed-size fetch worker pool
// - aggregate: merges per-snapshot batches into one set
//
// Only the index lookup can fail here. Snapshot failures are absorbed by
// the workers and simply contribute no paths.
// =============================================================================

mod aggregate;
mod progress;
mod workers;

pub use aggregate::{aggregate, AggregateResult};
pub use progress::Progress;
pub use workers::{spawn_pool, PathBatch, DEFAULT_WORKERS};

use crate::archive::ArchiveClient;
use crate::error::CrawlError;
use crate::sampler::{self, Limit};
use crate::target::Target;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Per-run settings for the pipeline
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub limit: Limit,
    pub recent: bool,
    pub workers: usize,
    pub quiet: bool,
}

/// What one target's pipeline produced
#[derive(Debug, Serialize)]
pub struct TargetReport {
    pub target: Target,
    /// Number of snapshots selected for fetching
    pub snapshots: usize,
    pub paths: AggregateResult,
}

// Runs index lookup, sampling, fetching and aggregation for one target
pub async fn crawl_target(
    client: &ArchiveClient,
    target: Target,
    options: &CrawlOptions,
) -> Result<TargetReport, CrawlError> {
    // Nothing would be fetched, and "limit=-0" could make the index send everything
    if options.limit == Limit::AtMost(0) {
        info!(%target, "limit is 0, skipping snapshot index");
        return Ok(TargetReport {
            target,
            snapshots: 0,
            paths: AggregateResult::new(),
        });
    }

    let versions = client
        .list_versions(&target, options.limit, options.recent)
        .await?;
    let selection = sampler::select(&versions, options.limit, options.recent);

    info!(
        %target,
        available = versions.len(),
        selected = selection.len(),
        "snapshots selected"
    );

    let snapshots = selection.len();
    let progress = Arc::new(Progress::new(
        snapshots as u64,
        format!("Enumerating {}/robots.txt versions...", target),
        options.quiet,
    ));

    let batches = spawn_pool(
        client.clone(),
        target.clone(),
        selection,
        options.workers,
        Arc::clone(&progress),
    );
    let paths = aggregate(batches).await;
    progress.finish();

    info!(%target, attempts = progress.attempts(), paths = paths.len(), "target finished");

    Ok(TargetReport {
        target,
        snapshots,
        paths,
    })
}
