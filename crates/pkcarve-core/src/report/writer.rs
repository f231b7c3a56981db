//! Report output.
//!
//! This module provides the [`ReportWriter`] trait for customizing how
//! decoded entries are rendered, and [`TextWriter`], the line-oriented
//! report printed by the command-line tool.

use super::Entry;
use crate::error::Error;
use crate::extra::ExtraRecord;
use crate::hex::{self, DEFAULT_PREVIEW_LEN};
use chrono::{DateTime, Local, Utc};
use std::io::{self, Write};

/// Trait for writing report events to output.
///
/// Events arrive in ascending offset order. Every method has a no-op
/// default so implementors only handle what they care about.
pub trait ReportWriter {
    /// Write a fully decoded local file header entry
    fn write_entry(&mut self, entry: &Entry<'_>) -> io::Result<()> {
        let _ = entry;
        Ok(())
    }

    /// Write a central directory marker hit
    fn write_central_marker(&mut self, offset: usize) -> io::Result<()> {
        let _ = offset;
        Ok(())
    }

    /// Write a match whose decode failed and was skipped
    fn write_failure(&mut self, offset: usize, error: &Error) -> io::Result<()> {
        let _ = (offset, error);
        Ok(())
    }

    /// Called once after the last event
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Plain-text report writer
#[derive(Debug)]
pub struct TextWriter<W: Write> {
    out: W,
    preview_len: usize,
    local_time: bool,
}

impl<W: Write> TextWriter<W> {
    /// Creates a writer rendering times in the local timezone
    pub fn new(out: W) -> Self {
        Self {
            out,
            preview_len: DEFAULT_PREVIEW_LEN,
            local_time: true,
        }
    }

    /// Sets how many bytes hex previews keep
    pub fn preview_len(mut self, len: usize) -> Self {
        self.preview_len = len;
        self
    }

    /// Renders times in UTC instead of the local timezone
    pub fn utc(mut self) -> Self {
        self.local_time = false;
        self
    }

    /// Returns the underlying output
    pub fn into_inner(self) -> W {
        self.out
    }

    fn format_time(&self, time: DateTime<Utc>) -> String {
        if self.local_time {
            time.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S %z")
                .to_string()
        } else {
            time.format("%Y-%m-%d %H:%M:%S %z").to_string()
        }
    }

    fn write_extra(&mut self, record: &ExtraRecord<'_>) -> io::Result<()> {
        let tag = record.tag();
        let name = record.name();
        match record {
            ExtraRecord::Timestamp(ts) => {
                let modified = self.format_time(ts.modified_at());
                let accessed = self.format_time(ts.accessed_at());
                let created = self.format_time(ts.created_at());
                writeln!(
                    self.out,
                    "\t0x{:04x} ({}): flags={:08b}, mod={}, ac={}, cr={}",
                    tag, name, ts.flags, modified, accessed, created
                )
            }
            ExtraRecord::SecurityDescriptor(sd) => writeln!(
                self.out,
                "\t0x{:04x} ({}): version={}, uncomp-size={}, comp-type={}, crc=0x{:x}, ({})[{}]",
                tag,
                name,
                sd.version,
                sd.uncompressed_size,
                sd.compression_type,
                sd.crc32,
                sd.data.len(),
                hex::abbreviate(sd.data, self.preview_len)
            ),
            ExtraRecord::UnixExtra(ux) => writeln!(
                self.out,
                "\t0x{:04x} ({}): version={}, uid({})={}, gid({})={}",
                tag, name, ux.version, ux.uid_size, ux.uid, ux.gid_size, ux.gid
            ),
            ExtraRecord::Opaque(opaque) => writeln!(
                self.out,
                "\t0x{:04x}, data: ({}) {}",
                tag,
                opaque.data.len(),
                hex::abbreviate(opaque.data, self.preview_len)
            ),
        }
    }
}

impl<W: Write> ReportWriter for TextWriter<W> {
    fn write_entry(&mut self, entry: &Entry<'_>) -> io::Result<()> {
        let header = &entry.header;
        let [flags_lo, flags_hi] = header.flag_bytes();

        writeln!(self.out)?;
        writeln!(self.out, "** found file! @ {}", entry.offset)?;
        writeln!(self.out, "version: {}", header.version_needed)?;
        writeln!(self.out, "flags: {:08b}:{:08b}", flags_lo, flags_hi)?;
        writeln!(self.out, "compression: {}", header.compression)?;
        writeln!(self.out, "modtime({:04x}): {}", header.mod_time.raw(), header.mod_time)?;
        writeln!(self.out, "moddate({:04x}): {}", header.mod_date.raw(), header.mod_date)?;
        writeln!(self.out, "crc-32: {:08x}", header.crc32)?;
        writeln!(self.out, "compressed-size: {}", header.compressed_size)?;
        writeln!(self.out, "uncompressed-size: {}", header.uncompressed_size)?;
        writeln!(
            self.out,
            "filename({}): {}",
            header.file_name_len(),
            header.file_name_lossy()
        )?;
        writeln!(self.out, "extrafield({}):", header.extra_field_len())?;
        for record in &entry.extra {
            self.write_extra(record)?;
        }

        let content = &entry.content;
        write!(
            self.out,
            "content: ({})[{}]",
            content.declared_len,
            content.abbreviated(self.preview_len)
        )?;
        if content.is_truncated() {
            write!(self.out, " truncated, {} bytes available", content.data.len())?;
        }
        writeln!(self.out)
    }

    fn write_central_marker(&mut self, offset: usize) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "** found central! @ {}", offset)
    }

    fn write_failure(&mut self, offset: usize, error: &Error) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "!! failed to decode file @ {}: {}", offset, error)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extra::{
        ExtendedTimestamp, OpaqueRecord, SecurityDescriptor, TimestampLayout, UnixExtra,
    };
    use crate::report::decode_entry;
    use crate::test_support::{sub_record, HeaderFixture};
    use pretty_assertions::assert_eq;

    fn render(records: &[ExtraRecord<'_>]) -> String {
        let mut writer = TextWriter::new(Vec::new()).utc();
        for record in records {
            writer.write_extra(record).unwrap();
        }
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_entry_text() {
        let mut data = HeaderFixture::new("a.txt")
            .compression(8)
            .compressed_size(10)
            .uncompressed_size(12)
            .crc32(0xdeadbeef)
            .flags(0x0800)
            .extra(sub_record(0x9999, &[0x01, 0x02, 0x03]))
            .encode();
        data.extend_from_slice(&[0x4b; 10]);
        let entry = decode_entry(&data, 0, TimestampLayout::Fixed).unwrap();

        let mut writer = TextWriter::new(Vec::new()).utc();
        writer.write_entry(&entry).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();

        assert_eq!(
            text,
            "\n\
             ** found file! @ 0\n\
             version: 20\n\
             flags: 00000000:00001000\n\
             compression: 8\n\
             modtime(0000): 00:00:00\n\
             moddate(0000): 1980-00-00\n\
             crc-32: deadbeef\n\
             compressed-size: 10\n\
             uncompressed-size: 12\n\
             filename(5): a.txt\n\
             extrafield(7):\n\
             \t0x9999, data: (3) 010203\n\
             content: (10)[4b4b4b4b4b4b4b4b4b4b]\n"
        );
    }

    #[test]
    fn test_truncated_content_is_flagged() {
        let mut data = HeaderFixture::new("x").compressed_size(100).encode();
        data.extend_from_slice(&[0x01, 0x02]);
        let entry = decode_entry(&data, 0, TimestampLayout::Fixed).unwrap();

        let mut writer = TextWriter::new(Vec::new());
        writer.write_entry(&entry).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert!(text.ends_with("content: (100)[0102] truncated, 2 bytes available\n"));
    }

    #[test]
    fn test_timestamp_text() {
        let text = render(&[ExtraRecord::Timestamp(ExtendedTimestamp {
            flags: 0x01,
            modified: 0,
            accessed: 0,
            created: 0,
        })]);
        assert_eq!(
            text,
            "\t0x5455 (\"UT\" Extended Timestamp): flags=00000001, \
             mod=1970-01-01 00:00:00 +0000, ac=1970-01-01 00:00:00 +0000, \
             cr=1970-01-01 00:00:00 +0000\n"
        );
    }

    #[test]
    fn test_security_descriptor_text() {
        let blob: Vec<u8> = (0..20).collect();
        let text = render(&[ExtraRecord::SecurityDescriptor(SecurityDescriptor {
            uncompressed_size: 116,
            version: 0,
            compression_type: 8,
            crc32: 0xabc,
            data: &blob,
        })]);
        assert_eq!(
            text,
            "\t0x4453 (\"SD\" Windows NT Security Descriptor): version=0, uncomp-size=116, \
             comp-type=8, crc=0xabc, (20)[0001020304050607...0c0d0e0f10111213]\n"
        );
    }

    #[test]
    fn test_unix_and_opaque_text() {
        let text = render(&[
            ExtraRecord::UnixExtra(UnixExtra {
                version: 1,
                uid_size: 2,
                uid: 1000,
                gid_size: 1,
                gid: 100,
            }),
            ExtraRecord::Opaque(OpaqueRecord {
                tag: 0x000a,
                data: &[0xff],
            }),
        ]);
        assert_eq!(
            text,
            "\t0x7875 (\"ux\" New Unix Extra): version=1, uid(2)=1000, gid(1)=100\n\
             \t0x000a, data: (1) ff\n"
        );
    }

    #[test]
    fn test_marker_and_failure_text() {
        let mut writer = TextWriter::new(Vec::new());
        writer.write_central_marker(42).unwrap();
        writer.write_failure(7, &Error::bounds(33, 2, 1)).unwrap();
        writer.finish().unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            text,
            "\n** found central! @ 42\n\n!! failed to decode file @ 7: \
             read of 2 bytes at offset 33 exceeds buffer (1 bytes available)\n"
        );
    }

    #[test]
    fn test_preview_len_applies_to_opaque_payloads() {
        let payload: Vec<u8> = (0..10).collect();
        let mut writer = TextWriter::new(Vec::new()).preview_len(4);
        writer
            .write_extra(&ExtraRecord::Opaque(OpaqueRecord {
                tag: 0x1234,
                data: &payload,
            }))
            .unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text, "\t0x1234, data: (10) 0001...0809\n");
    }
}
