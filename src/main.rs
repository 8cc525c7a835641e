// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse and validate command-line arguments
// 2. Read targets (positional arguments, or stdin one per line)
// 3. Run the snapshot pipeline for each target, one target at a time
// 4. Print each target's paths as soon as its pipeline completes
// 5. Exit with 0 on success, 1 on a fatal error
//
// Fatal errors: bad options, an unreadable stdin, or a snapshot index
// lookup that fails. Malformed input lines and missing snapshots are not.
// =============================================================================

mod archive;
mod cli;
mod error;
mod pool;
mod sampler;
mod target;

use anyhow::{Context, Result};
use archive::ArchiveClient;
use clap::Parser;
use cli::{Cli, CrawlConfig};
use pool::TargetReport;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run(Cli::parse()).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so stdout only ever carries results
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config()?;
    let client = ArchiveClient::new(&config.archive_url, config.timeout)?;
    let mut out = std::io::stdout().lock();

    if !config.targets.is_empty() {
        for raw in &config.targets {
            process_line(&client, &config, raw, &mut out).await?;
        }
        return Ok(());
    }

    process_input(&client, &config, BufReader::new(tokio::io::stdin()), &mut out).await
}

// Runs the pipeline for every line of `input`, in order, writing to `out`
//
// Lines are read as raw bytes, so a line that is not UTF-8 is skipped like
// any other malformed line. Only a failing read is fatal.
async fn process_input<R, W>(
    client: &ArchiveClient,
    config: &CrawlConfig,
    mut input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .await
            .context("Error reading URLs from stdin")?;
        if read == 0 {
            return Ok(());
        }

        match std::str::from_utf8(&buf) {
            Ok(line) => process_line(client, config, line, out).await?,
            Err(e) => warn!("skipping input line that is not UTF-8: {}", e),
        }
    }
}

// Runs the pipeline for one input line
//
// Blank or malformed lines are skipped; an index failure is returned as fatal.
async fn process_line<W: Write>(
    client: &ArchiveClient,
    config: &CrawlConfig,
    raw: &str,
    out: &mut W,
) -> Result<()> {
    if raw.trim().is_empty() {
        return Ok(());
    }

    let target = match target::normalize(raw) {
        Ok(target) => target,
        Err(e) => {
            warn!("skipping input line: {}", e);
            return Ok(());
        }
    };

    let report = pool::crawl_target(client, target, &config.options)
        .await
        .context("Error getting versions")?;

    print_report(&report, config.json, out)
}

// Prints one target's result block, either bare URLs or a single JSON line
fn print_report<W: Write>(report: &TargetReport, json: bool, out: &mut W) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, report)?;
        writeln!(out)?;
    } else {
        for path in &report.paths {
            writeln!(out, "{}", path)?;
        }
    }

    out.flush()?;
    Ok(())
}
