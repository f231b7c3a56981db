//! # pkcarve-core
//!
//! A library for recovering ZIP local file headers from raw byte streams.
//!
//! Instead of trusting the end of central directory record, the input is
//! brute-force scanned for signatures, so entries are recovered from
//! archives that are truncated, corrupted, or embedded inside other files.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`scanner`]: Signature scanning over raw bytes
//! - [`header`]: Local file header decoding
//! - [`extra`]: Extra field sub-record decoding
//! - [`content`]: Content location after a header
//! - [`report`]: Pipeline driver and report writers
//! - [`hex`]: Abbreviated hex rendering
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use pkcarve_core::{InspectConfig, Inspector, TextWriter};
//! use std::fs;
//!
//! let data = fs::read("./damaged.zip")?;
//!
//! let mut writer = TextWriter::new(std::io::stdout().lock());
//! let summary = Inspector::with_config(InspectConfig::default()).inspect(&data, &mut writer)?;
//! eprintln!("{} entries recovered", summary.entries);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod content;
pub mod error;
pub mod extra;
pub mod header;
pub mod hex;
mod reader;
pub mod report;
pub mod scanner;

#[cfg(test)]
mod test_support;

// Re-export primary types for convenience
pub use error::{Error, Result};
pub use extra::{decode_extra_field, ExtraRecord, TimestampLayout};
pub use header::{decode_header, LocalFileHeader};
pub use hex::abbreviate;
pub use report::{
    decode_entry, inspect_file, Entry, ErrorPolicy, Event, InspectConfig, Inspector,
    ReportWriter, Summary, TextWriter,
};
pub use scanner::{ScanMatch, Scanner, ScannerConfig, SignatureKind};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
