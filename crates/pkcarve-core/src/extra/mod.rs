//! Extra field decoding.
//!
//! The extra field of a local file header is a sequence of tagged
//! sub-records, each laid out as `{tag: u16, len: u16, payload: [u8; len]}`.
//! [`ExtraFields`] walks them in byte order and dispatches on the tag:
//!
//! | Tag      | Record                  |
//! |----------|-------------------------|
//! | `0x5455` | [`ExtendedTimestamp`]   |
//! | `0x4453` | [`SecurityDescriptor`]  |
//! | `0x7875` | [`UnixExtra`]           |
//! | other    | [`OpaqueRecord`]        |
//!
//! A sub-record that declares more payload than is left, or a trailing
//! fragment too short to hold a tag and length, yields a bounds error and
//! ends the sequence.

mod security;
mod timestamp;
mod unix;

use crate::error::Result;
use crate::reader::ByteReader;
use tracing::trace;

pub use security::SecurityDescriptor;
pub use timestamp::{
    ExtendedTimestamp, TimestampLayout, FLAG_ACCESSED, FLAG_CREATED, FLAG_MODIFIED,
};
pub use unix::UnixExtra;

/// Extended timestamp tag ("UT")
pub const TIMESTAMP_TAG: u16 = 0x5455;
/// Windows NT security descriptor tag ("SD")
pub const SECURITY_DESCRIPTOR_TAG: u16 = 0x4453;
/// Info-ZIP new Unix tag ("ux")
pub const UNIX_EXTRA_TAG: u16 = 0x7875;

/// A sub-record with a tag this decoder does not interpret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpaqueRecord<'a> {
    /// Sub-record tag
    pub tag: u16,
    /// Raw payload
    pub data: &'a [u8],
}

/// One decoded extra field sub-record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraRecord<'a> {
    /// `0x5455` extended timestamp
    Timestamp(ExtendedTimestamp),
    /// `0x4453` Windows NT security descriptor
    SecurityDescriptor(SecurityDescriptor<'a>),
    /// `0x7875` Unix owner
    UnixExtra(UnixExtra),
    /// Any other tag
    Opaque(OpaqueRecord<'a>),
}

impl ExtraRecord<'_> {
    /// Returns the sub-record tag
    pub fn tag(&self) -> u16 {
        match self {
            ExtraRecord::Timestamp(_) => TIMESTAMP_TAG,
            ExtraRecord::SecurityDescriptor(_) => SECURITY_DESCRIPTOR_TAG,
            ExtraRecord::UnixExtra(_) => UNIX_EXTRA_TAG,
            ExtraRecord::Opaque(record) => record.tag,
        }
    }

    /// Returns a short human-readable name for the record type
    pub fn name(&self) -> &'static str {
        match self {
            ExtraRecord::Timestamp(_) => "\"UT\" Extended Timestamp",
            ExtraRecord::SecurityDescriptor(_) => "\"SD\" Windows NT Security Descriptor",
            ExtraRecord::UnixExtra(_) => "\"ux\" New Unix Extra",
            ExtraRecord::Opaque(_) => "unknown",
        }
    }
}

/// Iterator over the sub-records of one extra field region.
///
/// Yields `Err` at most once, after which it is exhausted.
#[derive(Debug, Clone)]
pub struct ExtraFields<'a> {
    reader: ByteReader<'a>,
    layout: TimestampLayout,
    failed: bool,
}

impl<'a> ExtraFields<'a> {
    /// Iterates `data`, whose first byte sits at absolute `offset` in the input
    pub fn new(data: &'a [u8], offset: usize, layout: TimestampLayout) -> Self {
        Self {
            reader: ByteReader::new(data, offset),
            layout,
            failed: false,
        }
    }

    fn next_record(&mut self) -> Result<ExtraRecord<'a>> {
        let tag = self.reader.read_u16_le()?;
        let len = self.reader.read_u16_le()?;
        let payload_offset = self.reader.position();
        let payload = self.reader.take(usize::from(len))?;

        trace!(
            "Extra sub-record 0x{:04x} ({} bytes) at offset {}",
            tag,
            len,
            payload_offset
        );

        let mut payload_reader = ByteReader::new(payload, payload_offset);
        let record = match tag {
            TIMESTAMP_TAG => ExtraRecord::Timestamp(ExtendedTimestamp::decode(
                &mut payload_reader,
                self.layout,
            )?),
            SECURITY_DESCRIPTOR_TAG => {
                ExtraRecord::SecurityDescriptor(SecurityDescriptor::decode(&mut payload_reader)?)
            }
            UNIX_EXTRA_TAG => ExtraRecord::UnixExtra(UnixExtra::decode(&mut payload_reader)?),
            _ => ExtraRecord::Opaque(OpaqueRecord { tag, data: payload }),
        };
        Ok(record)
    }
}

impl<'a> Iterator for ExtraFields<'a> {
    type Item = Result<ExtraRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_empty() {
            return None;
        }
        let record = self.next_record();
        self.failed = record.is_err();
        Some(record)
    }
}

impl std::iter::FusedIterator for ExtraFields<'_> {}

/// Decodes a standalone extra field region with the default timestamp layout.
///
/// Error offsets are relative to the start of `data`.
pub fn decode_extra_field(data: &[u8]) -> ExtraFields<'_> {
    ExtraFields::new(data, 0, TimestampLayout::default())
}
