//! Info-ZIP new Unix extra field (`0x7875`, "ux").

use crate::error::Result;
use crate::reader::ByteReader;

/// Decoded owner record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnixExtra {
    /// Record version
    pub version: u8,
    /// Declared width of the uid in bytes
    pub uid_size: u8,
    /// Owner user id
    pub uid: u32,
    /// Declared width of the gid in bytes
    pub gid_size: u8,
    /// Owner group id
    pub gid: u32,
}

impl UnixExtra {
    pub(crate) fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let version = reader.read_u8()?;
        let uid_size = reader.read_u8()?;
        let uid = reader.read_var_uint("uid", uid_size)?;
        let gid_size = reader.read_u8()?;
        let gid = reader.read_var_uint("gid", gid_size)?;

        Ok(Self {
            version,
            uid_size,
            uid,
            gid_size,
            gid,
        })
    }
}
