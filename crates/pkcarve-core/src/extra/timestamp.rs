//! Extended timestamp extra field (`0x5455`, "UT").

use crate::error::Result;
use crate::reader::ByteReader;
use chrono::{DateTime, Utc};

/// Flag bit: modification time present
pub const FLAG_MODIFIED: u8 = 0x01;
/// Flag bit: access time present
pub const FLAG_ACCESSED: u8 = 0x02;
/// Flag bit: creation time present
pub const FLAG_CREATED: u8 = 0x04;

/// Width of one time slot in bytes
const SLOT_LEN: usize = 4;

/// How time slots are laid out after the flags byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampLayout {
    /// Slot `i` always lives at payload offset `1 + 4 * i`, whether or not
    /// earlier flag bits are set
    #[default]
    Fixed,
    /// Only flagged slots are stored, packed in flag order. A flagged slot
    /// past the end of the payload is treated as absent, as in the central
    /// directory form of this record.
    Variable,
}

/// Decoded extended timestamp record.
///
/// Times are Unix epoch seconds. A time whose flag bit is unset is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtendedTimestamp {
    /// Raw flags byte
    pub flags: u8,
    /// Modification time
    pub modified: u32,
    /// Access time
    pub accessed: u32,
    /// Creation time
    pub created: u32,
}

impl ExtendedTimestamp {
    pub(crate) fn decode(reader: &mut ByteReader<'_>, layout: TimestampLayout) -> Result<Self> {
        let flags = reader.read_u8()?;
        let mut times = [0u32; 3];
        let bits = [FLAG_MODIFIED, FLAG_ACCESSED, FLAG_CREATED];

        match layout {
            TimestampLayout::Fixed => {
                for (slot, (time, bit)) in times.iter_mut().zip(bits).enumerate() {
                    if flags & bit == 0 {
                        continue;
                    }
                    let mut slot_reader = reader.clone();
                    slot_reader.take(slot * SLOT_LEN)?;
                    *time = slot_reader.read_u32_le()?;
                }
            }
            TimestampLayout::Variable => {
                for (time, bit) in times.iter_mut().zip(bits) {
                    if flags & bit == 0 || reader.is_empty() {
                        continue;
                    }
                    *time = reader.read_u32_le()?;
                }
            }
        }

        let [modified, accessed, created] = times;
        Ok(Self {
            flags,
            modified,
            accessed,
            created,
        })
    }

    /// Returns true if the modification time flag is set
    pub fn has_modified(&self) -> bool {
        self.flags & FLAG_MODIFIED != 0
    }

    /// Returns true if the access time flag is set
    pub fn has_accessed(&self) -> bool {
        self.flags & FLAG_ACCESSED != 0
    }

    /// Returns true if the creation time flag is set
    pub fn has_created(&self) -> bool {
        self.flags & FLAG_CREATED != 0
    }

    /// Modification time as a UTC datetime
    pub fn modified_at(&self) -> DateTime<Utc> {
        from_epoch(self.modified)
    }

    /// Access time as a UTC datetime
    pub fn accessed_at(&self) -> DateTime<Utc> {
        from_epoch(self.accessed)
    }

    /// Creation time as a UTC datetime
    pub fn created_at(&self) -> DateTime<Utc> {
        from_epoch(self.created)
    }
}

fn from_epoch(secs: u32) -> DateTime<Utc> {
    // Every u32 second count is in chrono's range
    DateTime::from_timestamp(i64::from(secs), 0).unwrap_or_default()
}
