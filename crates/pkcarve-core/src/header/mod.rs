//! Local file header decoding.
//!
//! A local file header is a 30-byte little-endian fixed part followed by
//! the file name and the extra field:
//!
//! | Offset | Size | Field              |
//! |--------|------|--------------------|
//! | 0      | 4    | signature          |
//! | 4      | 2    | version needed     |
//! | 6      | 2    | flags              |
//! | 8      | 2    | compression method |
//! | 10     | 2    | mod time (DOS)     |
//! | 12     | 2    | mod date (DOS)     |
//! | 14     | 4    | CRC-32             |
//! | 18     | 4    | compressed size    |
//! | 22     | 4    | uncompressed size  |
//! | 26     | 2    | file name length n |
//! | 28     | 2    | extra length m     |
//! | 30     | n    | file name          |
//! | 30+n   | m    | extra field        |
//!
//! Fields are read strictly in order. The signature bytes are skipped, not
//! checked: callers hand in offsets the scanner already matched.

mod dos;

use crate::error::Result;
use crate::extra::{ExtraFields, TimestampLayout};
use crate::reader::ByteReader;
use crate::scanner::SIGNATURE_LEN;
use std::borrow::Cow;
use std::fmt;
use tracing::trace;

pub use dos::{DosDate, DosTime};

/// General purpose flag bit 3: sizes follow the data in a data descriptor
pub const FLAG_DATA_DESCRIPTOR: u16 = 0x0008;

/// ZIP compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    /// 0
    Stored,
    /// 1
    Shrunk,
    /// 6
    Imploded,
    /// 8
    Deflated,
    /// 9
    Deflate64,
    /// 12
    Bzip2,
    /// 14
    Lzma,
    /// 93
    Zstd,
    /// 95
    Xz,
    /// 99, WinZip AES encryption wrapper
    Aes,
    /// Anything else
    Unknown(u16),
}

impl CompressionMethod {
    /// Maps the raw field value to a method
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => Self::Stored,
            1 => Self::Shrunk,
            6 => Self::Imploded,
            8 => Self::Deflated,
            9 => Self::Deflate64,
            12 => Self::Bzip2,
            14 => Self::Lzma,
            93 => Self::Zstd,
            95 => Self::Xz,
            99 => Self::Aes,
            _ => Self::Unknown(value),
        }
    }

    /// Raw field value
    pub fn as_u16(&self) -> u16 {
        match self {
            Self::Stored => 0,
            Self::Shrunk => 1,
            Self::Imploded => 6,
            Self::Deflated => 8,
            Self::Deflate64 => 9,
            Self::Bzip2 => 12,
            Self::Lzma => 14,
            Self::Zstd => 93,
            Self::Xz => 95,
            Self::Aes => 99,
            Self::Unknown(v) => *v,
        }
    }

    /// Lowercase method name, `None` for unknown values
    pub fn name(&self) -> Option<&'static str> {
        let name = match self {
            Self::Stored => "stored",
            Self::Shrunk => "shrunk",
            Self::Imploded => "imploded",
            Self::Deflated => "deflated",
            Self::Deflate64 => "deflate64",
            Self::Bzip2 => "bzip2",
            Self::Lzma => "lzma",
            Self::Zstd => "zstd",
            Self::Xz => "xz",
            Self::Aes => "aes",
            Self::Unknown(_) => return None,
        };
        Some(name)
    }
}

impl fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

/// A decoded local file header, borrowing its variable parts from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalFileHeader<'a> {
    /// Offset of the signature in the input
    pub offset: usize,
    /// Version needed to extract
    pub version_needed: u16,
    /// General purpose bit flags
    pub flags: u16,
    /// Compression method
    pub compression: CompressionMethod,
    /// Last modification time
    pub mod_time: DosTime,
    /// Last modification date
    pub mod_date: DosDate,
    /// CRC-32 of the uncompressed data
    pub crc32: u32,
    /// Declared compressed size, returned as-is even when zero
    pub compressed_size: u32,
    /// Declared uncompressed size
    pub uncompressed_size: u32,
    /// Raw file name bytes
    pub file_name: &'a [u8],
    /// Raw extra field region
    pub extra_field: &'a [u8],
}

impl<'a> LocalFileHeader<'a> {
    /// Size of the fixed part, signature included
    pub const FIXED_LEN: usize = 30;

    /// Decodes the header whose signature starts at `offset`.
    ///
    /// Fails with a bounds error if any fixed field, the file name or the
    /// extra field would run past the end of `data`.
    pub fn decode(data: &'a [u8], offset: usize) -> Result<Self> {
        let mut reader = ByteReader::at(data, offset)?;
        reader.take(SIGNATURE_LEN)?;

        let version_needed = reader.read_u16_le()?;
        let flags = reader.read_u16_le()?;
        let compression = CompressionMethod::from_u16(reader.read_u16_le()?);
        let mod_time = DosTime(reader.read_u16_le()?);
        let mod_date = DosDate(reader.read_u16_le()?);
        let crc32 = reader.read_u32_le()?;
        let compressed_size = reader.read_u32_le()?;
        let uncompressed_size = reader.read_u32_le()?;
        let file_name_len = reader.read_u16_le()?;
        let extra_field_len = reader.read_u16_le()?;
        let file_name = reader.take(usize::from(file_name_len))?;
        let extra_field = reader.take(usize::from(extra_field_len))?;

        trace!(
            "Decoded header at {}: name {} bytes, extra {} bytes, content at {}",
            offset,
            file_name_len,
            extra_field_len,
            reader.position()
        );

        Ok(Self {
            offset,
            version_needed,
            flags,
            compression,
            mod_time,
            mod_date,
            crc32,
            compressed_size,
            uncompressed_size,
            file_name,
            extra_field,
        })
    }

    /// The two flag bytes in storage order
    pub fn flag_bytes(&self) -> [u8; 2] {
        self.flags.to_le_bytes()
    }

    /// Returns true if flag bit 3 (data descriptor) is set.
    ///
    /// Informational only: decoding never changes behavior on this bit.
    pub fn is_data_descriptor(&self) -> bool {
        self.flags & FLAG_DATA_DESCRIPTOR != 0
    }

    /// Declared file name length
    pub fn file_name_len(&self) -> usize {
        self.file_name.len()
    }

    /// Declared extra field length
    pub fn extra_field_len(&self) -> usize {
        self.extra_field.len()
    }

    /// File name decoded lossily as UTF-8
    pub fn file_name_lossy(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.file_name)
    }

    /// Absolute offset of the extra field region
    pub fn extra_field_offset(&self) -> usize {
        self.offset + Self::FIXED_LEN + self.file_name_len()
    }

    /// Absolute offset of the first content byte
    pub fn content_start(&self) -> usize {
        self.extra_field_offset() + self.extra_field_len()
    }

    /// Iterates the extra field sub-records
    pub fn extra_fields(&self, layout: TimestampLayout) -> ExtraFields<'a> {
        ExtraFields::new(self.extra_field, self.extra_field_offset(), layout)
    }
}

/// Decodes the header at `offset` together with its extra field.
///
/// Returns the content start offset and the declared compressed size.
pub fn decode_header(data: &[u8], offset: usize) -> Result<(usize, u32)> {
    let header = LocalFileHeader::decode(data, offset)?;
    for record in header.extra_fields(TimestampLayout::default()) {
        record?;
    }
    Ok((header.content_start(), header.compressed_size))
}
