//! pkcarve - Recover ZIP local file headers from damaged or embedded archives
//!
//! This tool scans a file byte by byte for local file header signatures and
//! prints every header it finds, its extra field records and a preview of
//! the content that follows. The central directory is never consulted.

use anyhow::{bail, Context, Result};
use clap::Parser;
use pkcarve_core::{
    inspect_file, ErrorPolicy, InspectConfig, ScannerConfig, Summary, TextWriter, TimestampLayout,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// Recover ZIP local file headers from damaged or embedded archives
#[derive(Parser, Debug)]
#[command(name = "pkcarve")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// File to scan
    file: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Abort the whole run on the first header that fails to decode
    #[arg(long)]
    fail_fast: bool,

    /// Read extended timestamps with only the flagged time slots stored
    #[arg(long)]
    variable_timestamps: bool,

    /// Number of bytes kept in hex previews
    #[arg(long, default_value = "16")]
    preview: usize,

    /// Do not report central directory markers
    #[arg(long)]
    no_central: bool,

    /// Maximum number of signature matches to report (0 = unlimited)
    #[arg(long, default_value = "0")]
    max_entries: usize,
}

impl Cli {
    fn inspect_config(&self) -> InspectConfig {
        let scanner = ScannerConfig::new()
            .max_results(self.max_entries)
            .report_central_markers(!self.no_central);
        let policy = if self.fail_fast {
            ErrorPolicy::Abort
        } else {
            ErrorPolicy::Skip
        };
        let layout = if self.variable_timestamps {
            TimestampLayout::Variable
        } else {
            TimestampLayout::Fixed
        };

        InspectConfig::new()
            .scanner(scanner)
            .policy(policy)
            .timestamp_layout(layout)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let summary = process_file(&cli, &cli.file, io::stdout().lock())?;
    info!(
        "Summary: {} entries, {} central markers, {} failed, {} bytes scanned",
        summary.entries, summary.central_markers, summary.failures, summary.bytes_scanned
    );

    Ok(())
}

/// Scan a single file and write its report to `out`
fn process_file<W: Write>(cli: &Cli, file: &Path, out: W) -> Result<Summary> {
    if !file.is_file() && file.exists() {
        bail!("Input path is not a file: {}", file.display());
    }

    debug!("Scanning {}", file.display());
    let mut writer = TextWriter::new(out).preview_len(cli.preview);
    let summary = inspect_file(file, cli.inspect_config(), &mut writer)
        .with_context(|| format!("Failed to scan {}", file.display()))?;

    Ok(summary)
}
