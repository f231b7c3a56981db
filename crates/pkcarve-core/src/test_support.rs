//! Builders for synthetic archive bytes used across unit tests.

use crate::header::{DosDate, DosTime};
use crate::scanner::LOCAL_FILE_HEADER_SIGNATURE;

/// Local file header with explicit field values
#[derive(Debug, Clone)]
pub(crate) struct HeaderFixture {
    version: u16,
    flags: u16,
    compression: u16,
    mod_time: DosTime,
    mod_date: DosDate,
    crc32: u32,
    compressed_size: u32,
    uncompressed_size: u32,
    name: Vec<u8>,
    extra: Vec<u8>,
}

impl HeaderFixture {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            version: 20,
            flags: 0,
            compression: 0,
            mod_time: DosTime::default(),
            mod_date: DosDate::default(),
            crc32: 0,
            compressed_size: 0,
            uncompressed_size: 0,
            name: name.as_bytes().to_vec(),
            extra: Vec::new(),
        }
    }

    pub(crate) fn version(mut self, version: u16) -> Self {
        self.version = version;
        self
    }

    pub(crate) fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub(crate) fn compression(mut self, compression: u16) -> Self {
        self.compression = compression;
        self
    }

    pub(crate) fn mod_time(mut self, time: DosTime) -> Self {
        self.mod_time = time;
        self
    }

    pub(crate) fn mod_date(mut self, date: DosDate) -> Self {
        self.mod_date = date;
        self
    }

    pub(crate) fn crc32(mut self, crc32: u32) -> Self {
        self.crc32 = crc32;
        self
    }

    pub(crate) fn compressed_size(mut self, size: u32) -> Self {
        self.compressed_size = size;
        self
    }

    pub(crate) fn uncompressed_size(mut self, size: u32) -> Self {
        self.uncompressed_size = size;
        self
    }

    pub(crate) fn extra(mut self, extra: Vec<u8>) -> Self {
        self.extra = extra;
        self
    }

    pub(crate) fn encode(&self) -> Vec<u8> {
        let mut out = LOCAL_FILE_HEADER_SIGNATURE.to_vec();
        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(&self.flags.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.mod_time.raw().to_le_bytes());
        out.extend_from_slice(&self.mod_date.raw().to_le_bytes());
        out.extend_from_slice(&self.crc32.to_le_bytes());
        out.extend_from_slice(&self.compressed_size.to_le_bytes());
        out.extend_from_slice(&self.uncompressed_size.to_le_bytes());
        out.extend_from_slice(&(self.name.len() as u16).to_le_bytes());
        out.extend_from_slice(&(self.extra.len() as u16).to_le_bytes());
        out.extend_from_slice(&self.name);
        out.extend_from_slice(&self.extra);
        out
    }
}

/// Encodes one extra field sub-record
pub(crate) fn sub_record(tag: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = tag.to_le_bytes().to_vec();
    out.extend_from_slice(&(payload.len() as u16).to_le_bytes());
    out.extend_from_slice(payload);
    out
}
