// src/pool/aggregate.rs
// =============================================================================
// Fan-in: merges per-snapshot batches into one deduplicated set.
//
// The aggregator is the only owner of the set, so no locking is needed.
// The set is only complete once the batch stream closes.
//
// Rust concepts:
// - Ownership: each batch is moved into the set, no copies are made
// - BTreeSet: a sorted set, so printing needs no extra sort step
// - Channels: recv() returns None once every sender is dropped
// =============================================================================

use super::PathBatch;               // Vec<String> of paths from one snapshot
use std::collections::BTreeSet;     // Ordered set, dedups on insert
use tokio::sync::mpsc;              // Async multi-producer, single-consumer channel

/// Every unique resolved path for one target, in lexical order
pub type AggregateResult = BTreeSet<String>;

// Consumes batches until every sender is gone and returns the union
pub async fn aggregate(mut batches: mpsc::Receiver<PathBatch>) -> AggregateResult {
    let mut paths = AggregateResult::new();
    while let Some(batch) = batches.recv().await {
        merge(&mut paths, batch);
    }
    paths
}

// Adds one batch to the set; duplicates are dropped by the set itself
pub fn merge(paths: &mut AggregateResult, batch: PathBatch) {
    paths.extend(batch);
}
