//! Signature scanning over raw bytes.
//!
//! The scanner does not interpret the container at all: it slides a 4-byte
//! window over every position of the input and reports each window that is
//! byte-equal to one of the known signatures. There is no skip-ahead after a
//! hit, so adjacent and overlapping matches are all reported. This keeps
//! recall high on truncated, corrupted or embedded archives where the end of
//! central directory record cannot be trusted.
//!
//! ## Example
//!
//! ```
//! use pkcarve_core::scanner::{Scanner, SignatureKind};
//!
//! let data = b"junkPK\x03\x04more";
//! let matches: Vec<_> = Scanner::new().scan(data).collect();
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].offset, 4);
//! assert_eq!(matches[0].kind, SignatureKind::LocalFileHeader);
//! ```

use tracing::{debug, trace};

/// Length of every signature the scanner knows about
pub const SIGNATURE_LEN: usize = 4;

/// Local file header signature, `PK\x03\x04`
pub const LOCAL_FILE_HEADER_SIGNATURE: [u8; SIGNATURE_LEN] = [0x50, 0x4B, 0x03, 0x04];

/// Central directory marker as matched on disk.
///
/// This is the central directory signature `50 4B 01 02` in reverse byte
/// order, compared as a plain pattern.
pub const CENTRAL_DIRECTORY_MARKER: [u8; SIGNATURE_LEN] = [0x02, 0x01, 0x4B, 0x50];

/// Which signature a window matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureKind {
    /// Start of a local file header
    LocalFileHeader,
    /// Central directory marker pattern
    CentralDirectoryMarker,
}

impl SignatureKind {
    /// Returns the byte pattern for this kind
    pub fn pattern(&self) -> &'static [u8; SIGNATURE_LEN] {
        match self {
            SignatureKind::LocalFileHeader => &LOCAL_FILE_HEADER_SIGNATURE,
            SignatureKind::CentralDirectoryMarker => &CENTRAL_DIRECTORY_MARKER,
        }
    }

    fn classify(window: &[u8]) -> Option<Self> {
        if window == LOCAL_FILE_HEADER_SIGNATURE {
            Some(SignatureKind::LocalFileHeader)
        } else if window == CENTRAL_DIRECTORY_MARKER {
            Some(SignatureKind::CentralDirectoryMarker)
        } else {
            None
        }
    }
}

/// A signature hit in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanMatch {
    /// Offset of the first signature byte
    pub offset: usize,
    /// Which signature matched
    pub kind: SignatureKind,
}

impl ScanMatch {
    /// Creates a new scan match
    pub fn new(offset: usize, kind: SignatureKind) -> Self {
        Self { offset, kind }
    }
}

/// Configuration for the scanner
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Maximum number of matches to report (0 = unlimited)
    pub max_results: usize,
    /// Whether central directory markers are reported
    pub report_central_markers: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_results: 0,
            report_central_markers: true,
        }
    }
}

impl ScannerConfig {
    /// Creates a new scanner config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of results to return
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Sets whether central directory markers are reported
    pub fn report_central_markers(mut self, report: bool) -> Self {
        self.report_central_markers = report;
        self
    }
}

/// Brute-force signature scanner
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScannerConfig,
}

impl Scanner {
    /// Creates a new scanner with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new scanner with custom configuration
    pub fn with_config(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Returns the scanner configuration
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Lazily scans `data`, yielding matches in ascending offset order.
    pub fn scan<'a>(&self, data: &'a [u8]) -> Matches<'a> {
        debug!("Starting scan of {} bytes", data.len());
        Matches {
            data,
            position: 0,
            reported: 0,
            config: self.config.clone(),
        }
    }
}

/// Iterator over the signature matches of one input buffer.
///
/// Produced by [`Scanner::scan`]. Single forward pass.
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    data: &'a [u8],
    /// Start offset of the next window to test
    position: usize,
    reported: usize,
    config: ScannerConfig,
}

impl Matches<'_> {
    fn limit_reached(&self) -> bool {
        self.config.max_results > 0 && self.reported >= self.config.max_results
    }
}

impl Iterator for Matches<'_> {
    type Item = ScanMatch;

    fn next(&mut self) -> Option<ScanMatch> {
        while !self.limit_reached() && self.position + SIGNATURE_LEN <= self.data.len() {
            let offset = self.position;
            self.position += 1;

            let window = &self.data[offset..offset + SIGNATURE_LEN];
            let Some(kind) = SignatureKind::classify(window) else {
                continue;
            };
            if kind == SignatureKind::CentralDirectoryMarker && !self.config.report_central_markers
            {
                continue;
            }

            trace!("Found {:?} signature at offset {}", kind, offset);
            self.reported += 1;
            return Some(ScanMatch::new(offset, kind));
        }
        None
    }
}

impl std::iter::FusedIterator for Matches<'_> {}
