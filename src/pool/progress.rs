// src/pool/progress.rs
// =============================================================================
// Progress reporting for snapshot fetches.
//
// One tick per attempt, success or not, so the bar reaches 100% even when
// most captures are missing. Workers share one Progress through an Arc.
//
// Rust concepts:
// - Atomics: AtomicU64 can be incremented from many tasks through &self
// - Interior mutability: tick() takes &self, not &mut self
// - Arc: shared ownership across spawned tasks
// =============================================================================

use indicatif::{ProgressBar, ProgressStyle};    // Terminal progress bar drawn on stderr
use std::sync::atomic::{AtomicU64, Ordering};   // Lock-free counter

pub struct Progress {
    /// Terminal bar on stderr (hidden in quiet mode)
    bar: ProgressBar,
    /// Fetch attempts so far
    attempts: AtomicU64,
}

impl Progress {
    pub fn new(total: u64, message: String, quiet: bool) -> Self {
        // A hidden bar still counts, it just never draws
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            // One unit per snapshot attempt
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            bar
        };
        bar.set_message(message);

        Self {
            bar,
            attempts: AtomicU64::new(0),
        }
    }

    /// A progress tracker that draws nothing
    #[cfg(test)]
    pub fn hidden(total: u64) -> Self {
        Self::new(total, String::new(), true)
    }

    /// Records one finished fetch attempt
    pub fn tick(&self) {
        // Read only after every worker has been joined
        self.attempts.fetch_add(1, Ordering::Relaxed);
        self.bar.inc(1);
    }

    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_tick_counts_attempts() {
        let progress = Progress::hidden(3);
        progress.tick();
        progress.tick();
        assert_eq!(progress.attempts(), 2);
        progress.finish();
    }

    #[tokio::test]
    async fn test_concurrent_ticks() {
        let progress = Arc::new(Progress::hidden(100));
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let progress = Arc::clone(&progress);
                tokio::spawn(async move {
                    for _ in 0..10 {
                        progress.tick();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(progress.attempts(), 100);
    }
}
