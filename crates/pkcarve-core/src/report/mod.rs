//! The decode pipeline driver.
//!
//! [`Inspector`] ties the stages together for one input buffer:
//!
//! 1. [`Scanner`] finds every signature offset
//! 2. [`LocalFileHeader::decode`] decodes each local file header match
//! 3. [`ExtraFields`](crate::extra::ExtraFields) decodes its extra field
//! 4. [`ContentPreview`] locates the content that follows
//!
//! Results are surfaced as [`Event`]s, either lazily through
//! [`Inspector::events`] or pushed into a [`ReportWriter`] by
//! [`Inspector::inspect`].
//!
//! How a decode failure is handled is selected by [`ErrorPolicy`].

mod writer;

use crate::content::ContentPreview;
use crate::error::{Error, Result};
use crate::extra::{ExtraRecord, TimestampLayout};
use crate::header::LocalFileHeader;
use crate::scanner::{Matches, ScanMatch, Scanner, ScannerConfig, SignatureKind};
use std::path::Path;
use tracing::{debug, warn};

pub use writer::{ReportWriter, TextWriter};

/// What happens when a local file header match fails to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop the whole run with the error
    Abort,
    /// Report the failure, log a warning and resume at the next byte
    #[default]
    Skip,
}

/// Configuration for a pipeline run
#[derive(Debug, Clone, Default)]
pub struct InspectConfig {
    /// Scanner settings
    pub scanner: ScannerConfig,
    /// Decode failure handling
    pub policy: ErrorPolicy,
    /// Slot layout used for extended timestamps
    pub timestamp_layout: TimestampLayout,
}

impl InspectConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scanner configuration
    pub fn scanner(mut self, scanner: ScannerConfig) -> Self {
        self.scanner = scanner;
        self
    }

    /// Sets the error policy
    pub fn policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the extended timestamp layout
    pub fn timestamp_layout(mut self, layout: TimestampLayout) -> Self {
        self.timestamp_layout = layout;
        self
    }
}

/// A fully decoded local file header match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<'a> {
    /// Offset of the header signature
    pub offset: usize,
    /// Decoded fixed and variable fields
    pub header: LocalFileHeader<'a>,
    /// Extra field sub-records in byte order
    pub extra: Vec<ExtraRecord<'a>>,
    /// Content following the header
    pub content: ContentPreview<'a>,
}

/// One step of the report
#[derive(Debug)]
pub enum Event<'a> {
    /// A decoded local file header
    Entry(Entry<'a>),
    /// A central directory marker hit
    CentralMarker {
        /// Offset of the marker
        offset: usize,
    },
    /// A local file header match that failed to decode under [`ErrorPolicy::Skip`]
    Failed {
        /// Offset of the header signature
        offset: usize,
        /// Why decoding stopped
        error: Error,
    },
}

/// Counts collected over one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Size of the scanned input
    pub bytes_scanned: usize,
    /// Local file headers decoded
    pub entries: usize,
    /// Central directory markers seen
    pub central_markers: usize,
    /// Local file header matches that failed to decode
    pub failures: usize,
}

/// Decodes the entry whose local file header signature starts at `offset`.
pub fn decode_entry(data: &[u8], offset: usize, layout: TimestampLayout) -> Result<Entry<'_>> {
    let header = LocalFileHeader::decode(data, offset)?;
    let extra = header.extra_fields(layout).collect::<Result<Vec<_>>>()?;
    let content = ContentPreview::locate(data, header.content_start(), header.compressed_size);
    Ok(Entry {
        offset,
        header,
        extra,
        content,
    })
}

/// Drives the full decode pipeline over an input buffer
#[derive(Debug, Clone, Default)]
pub struct Inspector {
    config: InspectConfig,
}

impl Inspector {
    /// Creates a new inspector with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new inspector with custom configuration
    pub fn with_config(config: InspectConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration
    pub fn config(&self) -> &InspectConfig {
        &self.config
    }

    /// Lazily decodes every match in `data`.
    ///
    /// Under [`ErrorPolicy::Abort`] the first decode error is yielded as
    /// `Err` and ends the sequence.
    pub fn events<'a>(&self, data: &'a [u8]) -> Events<'a> {
        Events {
            data,
            matches: Scanner::with_config(self.config.scanner.clone()).scan(data),
            policy: self.config.policy,
            layout: self.config.timestamp_layout,
            done: false,
        }
    }

    /// Decodes `data` and writes every event to `writer`.
    pub fn inspect<W: ReportWriter>(&self, data: &[u8], writer: &mut W) -> Result<Summary> {
        let mut summary = Summary {
            bytes_scanned: data.len(),
            ..Summary::default()
        };

        for event in self.events(data) {
            match event? {
                Event::Entry(entry) => {
                    summary.entries += 1;
                    writer.write_entry(&entry)?;
                }
                Event::CentralMarker { offset } => {
                    summary.central_markers += 1;
                    writer.write_central_marker(offset)?;
                }
                Event::Failed { offset, error } => {
                    summary.failures += 1;
                    writer.write_failure(offset, &error)?;
                }
            }
        }
        writer.finish()?;

        debug!(
            "Inspection complete: {} entries, {} central markers, {} failures",
            summary.entries, summary.central_markers, summary.failures
        );
        Ok(summary)
    }
}

/// Iterator over the report events of one input buffer.
///
/// Produced by [`Inspector::events`].
#[derive(Debug)]
pub struct Events<'a> {
    data: &'a [u8],
    matches: Matches<'a>,
    policy: ErrorPolicy,
    layout: TimestampLayout,
    done: bool,
}

impl<'a> Events<'a> {
    fn decode(&mut self, found: ScanMatch) -> Option<Result<Event<'a>>> {
        let offset = found.offset;
        if found.kind == SignatureKind::CentralDirectoryMarker {
            return Some(Ok(Event::CentralMarker { offset }));
        }

        match decode_entry(self.data, offset, self.layout) {
            Ok(entry) => Some(Ok(Event::Entry(entry))),
            Err(error) if self.policy == ErrorPolicy::Skip && error.is_recoverable() => {
                warn!("Skipping local file header at offset {}: {}", offset, error);
                Some(Ok(Event::Failed { offset, error }))
            }
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}

impl<'a> Iterator for Events<'a> {
    type Item = Result<Event<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let found = self.matches.next()?;
        self.decode(found)
    }
}

/// Reads the file at `path` and inspects it.
///
/// This is a convenience function; the whole file is read into memory.
pub fn inspect_file<W: ReportWriter>(
    path: impl AsRef<Path>,
    config: InspectConfig,
    writer: &mut W,
) -> Result<Summary> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;
    debug!("Read {} bytes from {}", data.len(), path.display());
    Inspector::with_config(config).inspect(&data, writer)
}
