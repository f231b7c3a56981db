//! Bounds-checked little-endian cursor over a borrowed byte slice.
//!
//! Every read checks the remaining length first and reports failures with
//! the absolute offset into the original input, so errors from nested
//! decoders (extra fields inside a header) still point at the right byte.

use crate::error::{Error, Result};
use bytes::Buf;

/// Forward-only reader over `&[u8]`.
#[derive(Debug, Clone)]
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    /// Reader over `data`, whose first byte sits at absolute `offset`.
    pub(crate) fn new(data: &'a [u8], offset: usize) -> Self {
        Self { data, offset }
    }

    /// Reader positioned at `offset` within `data`.
    pub(crate) fn at(data: &'a [u8], offset: usize) -> Result<Self> {
        let tail = data
            .get(offset..)
            .ok_or_else(|| Error::bounds(offset, 0, 0))?;
        Ok(Self::new(tail, offset))
    }

    /// Absolute offset of the next unread byte
    pub(crate) fn position(&self) -> usize {
        self.offset
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.remaining()
    }

    pub(crate) fn is_empty(&self) -> bool {
        !self.data.has_remaining()
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        if self.remaining() < needed {
            return Err(Error::bounds(self.offset, needed, self.remaining()));
        }
        Ok(())
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        self.offset += 1;
        Ok(self.data.get_u8())
    }

    pub(crate) fn read_u16_le(&mut self) -> Result<u16> {
        self.ensure(2)?;
        self.offset += 2;
        Ok(self.data.get_u16_le())
    }

    pub(crate) fn read_u32_le(&mut self) -> Result<u32> {
        self.ensure(4)?;
        self.offset += 4;
        Ok(self.data.get_u32_le())
    }

    /// Reads an unsigned integer stored in `size` bytes (1, 2 or 4).
    ///
    /// The width is validated before any bytes are consumed.
    pub(crate) fn read_var_uint(&mut self, field: &'static str, size: u8) -> Result<u32> {
        match size {
            1 => self.read_u8().map(u32::from),
            2 => self.read_u16_le().map(u32::from),
            4 => self.read_u32_le(),
            _ => Err(Error::unsupported_size(field, size)),
        }
    }

    /// Borrows the next `len` bytes and advances past them.
    pub(crate) fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        self.ensure(len)?;
        let (head, tail) = self.data.split_at(len);
        self.data = tail;
        self.offset += len;
        Ok(head)
    }

    /// Borrows everything left, leaving the reader empty.
    pub(crate) fn rest(&mut self) -> &'a [u8] {
        let rest = self.data;
        self.offset += rest.len();
        self.data = &[];
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_reads() {
        let data = [0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xAA, 0xBB];
        let mut reader = ByteReader::new(&data, 100);

        assert_eq!(reader.read_u8().unwrap(), 0x01);
        assert_eq!(reader.read_u16_le().unwrap(), 0x1234);
        assert_eq!(reader.read_u32_le().unwrap(), 0x1234_5678);
        assert_eq!(reader.position(), 107);
        assert_eq!(reader.take(1).unwrap(), &[0xAA]);
        assert_eq!(reader.rest(), &[0xBB]);
        assert!(reader.is_empty());
        assert_eq!(reader.position(), 109);
    }

    #[test]
    fn test_short_read_reports_absolute_offset() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = ByteReader::new(&data, 40);
        reader.read_u8().unwrap();

        match reader.read_u32_le() {
            Err(Error::Bounds {
                offset,
                needed,
                available,
            }) => {
                assert_eq!(offset, 41);
                assert_eq!(needed, 4);
                assert_eq!(available, 2);
            }
            other => panic!("expected bounds error, got {:?}", other),
        }
        // A failed read consumes nothing
        assert_eq!(reader.remaining(), 2);
    }

    #[test]
    fn test_var_uint_widths() {
        let data = [0x64, 0xE8, 0x03, 0x01, 0x00, 0x00, 0x80];
        let mut reader = ByteReader::new(&data, 0);
        assert_eq!(reader.read_var_uint("uid", 1).unwrap(), 100);
        assert_eq!(reader.read_var_uint("uid", 2).unwrap(), 1000);
        assert_eq!(reader.read_var_uint("uid", 4).unwrap(), 0x8000_0001);
    }

    #[test]
    fn test_var_uint_unsupported_width() {
        let data = [0u8; 8];
        let mut reader = ByteReader::new(&data, 0);
        assert!(matches!(
            reader.read_var_uint("gid", 8),
            Err(Error::UnsupportedSize { field: "gid", size: 8 })
        ));
        assert_eq!(reader.remaining(), 8);
    }

    #[test]
    fn test_at_past_end() {
        let data = [0u8; 4];
        assert!(ByteReader::at(&data, 4).unwrap().is_empty());
        assert!(ByteReader::at(&data, 5).is_err());
    }
}
