// src/pool/workers.rs
// =============================================================================
// This module runs the snapshot fetch worker pool.
//
// Layout (one run per target):
//
//   dispatcher --jobs--> worker 1 --\
//              (bounded) worker 2 ---+--batches--> aggregator
//                        ...        /
//                        worker N -/
//
// - The dispatcher is the only sender on the job channel. It closes the
//   channel by dropping its sender once every timestamp is queued.
// - Each worker pulls timestamps until the job channel is closed and empty.
// - A closer task waits for all workers (the barrier) and only then drops
//   the last batch sender, which is what ends the aggregator's loop.
//
// A snapshot that can't be fetched sends nothing; it never fails the run.
// =============================================================================

use super::Progress;
use crate::archive::{extract_directive_paths, ArchiveClient, SnapshotTimestamp};
use crate::target::Target;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

/// All resolved paths found in one snapshot
pub type PathBatch = Vec<String>;

/// Default number of concurrent snapshot fetches
pub const DEFAULT_WORKERS: usize = 10;

// Starts the dispatcher, `workers` fetch workers and the closer task
//
// Returns the receiving end of the batch stream. The stream closes after
// every worker has finished.
pub fn spawn_pool(
    client: ArchiveClient,
    target: Target,
    selection: Vec<SnapshotTimestamp>,
    workers: usize,
    progress: Arc<Progress>,
) -> mpsc::Receiver<PathBatch> {
    let workers = workers.max(1);

    let (job_tx, job_rx) = mpsc::channel::<SnapshotTimestamp>(workers);
    let (batch_tx, batch_rx) = mpsc::channel::<PathBatch>(workers);

    // tokio's mpsc has a single receiver, so workers take turns on it
    let job_rx = Arc::new(Mutex::new(job_rx));

    tokio::spawn(async move {
        for timestamp in selection {
            if job_tx.send(timestamp).await.is_err() {
                break;
            }
        }
    });

    let handles: Vec<_> = (0..workers)
        .map(|id| {
            tokio::spawn(run_worker(
                id,
                client.clone(),
                target.clone(),
                Arc::clone(&job_rx),
                batch_tx.clone(),
                Arc::clone(&progress),
            ))
        })
        .collect();

    tokio::spawn(async move {
        for result in join_all(handles).await {
            if let Err(e) = result {
                warn!("snapshot worker stopped abnormally: {}", e);
            }
        }
        drop(batch_tx);
    });

    batch_rx
}

async fn run_worker(
    id: usize,
    client: ArchiveClient,
    target: Target,
    jobs: Arc<Mutex<mpsc::Receiver<SnapshotTimestamp>>>,
    batches: mpsc::Sender<PathBatch>,
    progress: Arc<Progress>,
) {
    loop {
        // The guard is dropped at the end of this statement, before the fetch
        let next = jobs.lock().await.recv().await;
        let Some(timestamp) = next else {
            break;
        };

        if let Some(batch) = fetch_one(&client, &target, &timestamp, &progress).await {
            if batches.send(batch).await.is_err() {
                break;
            }
        }
    }

    debug!(worker = id, "job queue drained");
}

// Fetches and parses one snapshot
//
// Progress ticks as soon as the fetch returns, before any parsing.
// Returns None when the capture is unavailable (non-200 or transport error).
pub async fn fetch_one(
    client: &ArchiveClient,
    target: &Target,
    timestamp: &str,
    progress: &Progress,
) -> Option<PathBatch> {
    let fetched = client.fetch_snapshot(target, timestamp).await;
    progress.tick();

    match fetched {
        Ok(body) => {
            let paths = extract_directive_paths(target, &body);
            debug!(%target, timestamp, paths = paths.len(), "snapshot parsed");
            Some(paths)
        }
        Err(e) => {
            debug!(%target, "skipping snapshot: {}", e);
            None
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Arc<Mutex<Receiver>> for the job queue?
//    - tokio::sync::mpsc allows many senders but only one receiver
//    - Wrapping the receiver lets several workers pull from the same queue
//    - Only one worker waits on recv() at a time; the others wait on the lock
//
// 2. How does the batch stream know when to close?
//    - recv() returns None once every Sender clone has been dropped
//    - Each worker drops its clone when it returns
//    - The closer task holds the original sender until join_all() finishes
//
// 3. Why `let Some(x) = ... else { break; }`?
//    - let-else binds on success and must diverge (break/return) otherwise
//    - It keeps the happy path unindented
// -----------------------------------------------------------------------------
