//! Windows NT security descriptor extra field (`0x4453`, "SD").

use crate::error::Result;
use crate::reader::ByteReader;

/// Decoded security descriptor header plus its compressed blob.
///
/// The blob is kept as-is; it is never decompressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityDescriptor<'a> {
    /// Size of the descriptor once decompressed
    pub uncompressed_size: u32,
    /// Record version
    pub version: u8,
    /// Compression type of the blob
    pub compression_type: u16,
    /// CRC-32 of the uncompressed descriptor
    pub crc32: u32,
    /// Compressed descriptor bytes
    pub data: &'a [u8],
}

impl<'a> SecurityDescriptor<'a> {
    /// Size of the fixed fields preceding the blob
    pub const HEADER_LEN: usize = 11;

    pub(crate) fn decode(reader: &mut ByteReader<'a>) -> Result<Self> {
        Ok(Self {
            uncompressed_size: reader.read_u32_le()?,
            version: reader.read_u8()?,
            compression_type: reader.read_u16_le()?,
            crc32: reader.read_u32_le()?,
            data: reader.rest(),
        })
    }
}
