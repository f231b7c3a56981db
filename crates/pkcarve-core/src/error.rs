//! Error types for the pkcarve-core library.
//!
//! This module provides error handling using the `thiserror` crate, with
//! one variant per failure mode of the decode pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pkcarve operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all pkcarve operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A fixed-field read or a declared length runs past the end of the buffer
    #[error("read of {needed} bytes at offset {offset} exceeds buffer ({available} bytes available)")]
    Bounds {
        /// Absolute offset in the input where the read started
        offset: usize,
        /// Number of bytes the read required
        needed: usize,
        /// Number of bytes actually left
        available: usize,
    },

    /// A variable-width integer declared an unsupported byte width
    #[error("unsupported {field} size: {size} (expected 1, 2 or 4)")]
    UnsupportedSize {
        /// Name of the field being decoded (`uid` or `gid`)
        field: &'static str,
        /// The declared width in bytes
        size: u8,
    },

    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the report
    #[error("failed to write report: {0}")]
    Write(#[from] std::io::Error),
}

impl Error {
    /// Creates a new bounds error
    pub fn bounds(offset: usize, needed: usize, available: usize) -> Self {
        Self::Bounds {
            offset,
            needed,
            available,
        }
    }

    /// Creates a new unsupported size error
    pub fn unsupported_size(field: &'static str, size: u8) -> Self {
        Self::UnsupportedSize { field, size }
    }

    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Returns true if this is a decode error that per-match recovery may skip
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Bounds { .. } | Self::UnsupportedSize { .. })
    }
}
