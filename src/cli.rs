// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Hosts come from the positional arguments, or from stdin (one per line)
// when none are given:
//
//   echo example.com | robots-history --limit 20
//   robots-history --recent --limit 5 example.com example.org
//
// Cli::into_config() validates the raw flags once, at startup.
// =============================================================================

use crate::archive::DEFAULT_ARCHIVE_URL;
use crate::pool::{CrawlOptions, DEFAULT_WORKERS};
use crate::sampler::Limit;
use anyhow::{anyhow, bail, Result};
use clap::Parser;
use std::time::Duration;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "robots-history",
    version,
    about = "Rebuild every path a site's robots.txt has ever listed, using web archive snapshots",
    long_about = "robots-history looks up archived copies of a site's robots.txt, downloads a sample of them \
                  concurrently and prints the union of all Allow/Disallow paths as full URLs."
)]
pub struct Cli {
    /// Hosts or URLs to process. Read from stdin, one per line, when omitted
    pub targets: Vec<String>,

    /// Number of snapshots to fetch per target. Use -1 for unlimited
    #[arg(long, default_value_t = 50, allow_negative_numbers = true)]
    pub limit: i64,

    /// Use the most recent snapshots instead of spreading them over the whole history
    #[arg(long)]
    pub recent: bool,

    /// Number of concurrent snapshot downloads
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Base URL of the web archive
    #[arg(long, default_value = DEFAULT_ARCHIVE_URL)]
    pub archive_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Print one JSON object per target instead of one URL per line
    #[arg(long)]
    pub json: bool,

    /// Hide the progress bar
    #[arg(long, short)]
    pub quiet: bool,
}

/// Validated settings for a whole run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub targets: Vec<String>,
    pub options: CrawlOptions,
    pub archive_url: String,
    pub timeout: Duration,
    pub json: bool,
}

impl Cli {
    pub fn into_config(self) -> Result<CrawlConfig> {
        let limit = Limit::from_flag(self.limit)
            .ok_or_else(|| anyhow!("--limit must be -1 (unlimited) or >= 0, got {}", self.limit))?;

        if self.workers == 0 {
            bail!("--workers must be at least 1");
        }

        let archive_url = Url::parse(&self.archive_url)
            .map_err(|e| anyhow!("Invalid --archive-url '{}': {}", self.archive_url, e))?;
        if !matches!(archive_url.scheme(), "http" | "https") {
            bail!("--archive-url must be an http(s) URL, got '{}'", self.archive_url);
        }

        Ok(CrawlConfig {
            targets: self.targets,
            options: CrawlOptions {
                limit,
                recent: self.recent,
                workers: self.workers,
                quiet: self.quiet,
            },
            archive_url: self.archive_url,
            timeout: Duration::from_secs(self.timeout),
            json: self.json,
        })
    }
}
