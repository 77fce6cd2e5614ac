//! benchdiff CLI - compare before/after benchmark results
//!
//! Usage:
//!   benchdiff [OPTIONS] <BEFORE> <AFTER>
//!
//! Reads a Go-style benchmark report from stdin (or a file with -f),
//! pairs the records matched by the two patterns, and prints one
//! tab-aligned delta table per metric.

use anyhow::{Context, Result};
use benchdiff::Options;
use clap::Parser;
use owo_colors::OwoColorize;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process;

/// Compare before/after benchmark results
#[derive(Parser)]
#[command(name = "benchdiff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Regular expression matching the before (baseline) benchmarks
    before: String,

    /// Regular expression matching the after (candidate) benchmarks
    after: String,

    /// Read the benchmark report from a file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Show only benchmarks that have changed
    #[arg(short, long)]
    changed: bool,

    /// Sort benchmarks by magnitude of change
    #[arg(short, long)]
    mag: bool,
}

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => process::exit(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".bright_red().bold(), e);
            process::exit(EXIT_ERROR);
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    // The input handle only lives as long as parsing needs it.
    let records = match &cli.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            benchdiff::parse(BufReader::new(file))
        }
        None => benchdiff::parse(io::stdin().lock()),
    }
    .context("Failed to parse benchmark report")?;

    let mut cmps = benchdiff::correlate(&records, &cli.before, &cli.after)
        .context("Failed to correlate benchmarks")?;

    let opts = Options {
        changed_only: cli.changed,
        mag_sort: cli.mag,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    benchdiff::write_report(&mut out, &mut cmps, &opts)
        .context("Failed to write report")?;
    out.flush().context("Failed to flush output")?;

    Ok(())
}
