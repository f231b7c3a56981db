//! Packed MS-DOS time and date fields.

use std::fmt;

/// DOS time: bits `[0:5)` seconds/2, `[5:11)` minutes, `[11:16)` hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DosTime(pub u16);

impl DosTime {
    /// Packs the given components. Seconds are stored at 2-second resolution.
    pub fn from_parts(hour: u8, minute: u8, second: u8) -> Self {
        let raw = (u16::from(hour & 0x1f) << 11)
            | (u16::from(minute & 0x3f) << 5)
            | u16::from((second / 2) & 0x1f);
        Self(raw)
    }

    /// Raw packed value
    pub fn raw(&self) -> u16 {
        self.0
    }

    /// Hour of day
    pub fn hour(&self) -> u8 {
        (self.0 >> 11) as u8
    }

    /// Minute of hour
    pub fn minute(&self) -> u8 {
        ((self.0 >> 5) & 0x3f) as u8
    }

    /// Seconds, already doubled back from the stored value
    pub fn second(&self) -> u8 {
        ((self.0 & 0x1f) as u8) * 2
    }
}

impl fmt::Display for DosTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour(), self.minute(), self.second())
    }
}

/// DOS date: bits `[0:5)` day, `[5:9)` month, `[9:16)` years since 1980
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DosDate(pub u16);

impl DosDate {
    /// Epoch year of the packed year field
    pub const BASE_YEAR: u16 = 1980;

    /// Packs the given components. `year` must be in `1980..=2107`.
    pub fn from_parts(year: u16, month: u8, day: u8) -> Self {
        let raw = ((year.saturating_sub(Self::BASE_YEAR) & 0x7f) << 9)
            | (u16::from(month & 0x0f) << 5)
            | u16::from(day & 0x1f);
        Self(raw)
    }

    /// Raw packed value
    pub fn raw(&self) -> u16 {
        self.0
    }

    /// Full calendar year
    pub fn year(&self) -> u16 {
        Self::BASE_YEAR + (self.0 >> 9)
    }

    /// Month, 1-based when valid
    pub fn month(&self) -> u8 {
        ((self.0 >> 5) & 0x0f) as u8
    }

    /// Day of month
    pub fn day(&self) -> u8 {
        (self.0 & 0x1f) as u8
    }
}

impl fmt::Display for DosDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_bit_layout() {
        // 13:47:58 -> hour 13, minute 47, second/2 29
        let raw = (13 << 11) | (47 << 5) | 29;
        let time = DosTime(raw);
        assert_eq!(time.hour(), 13);
        assert_eq!(time.minute(), 47);
        assert_eq!(time.second(), 58);
        assert_eq!(time.to_string(), "13:47:58");
        assert_eq!(DosTime::from_parts(13, 47, 58), time);
    }

    #[test]
    fn test_minutes_use_six_bits() {
        // Minute 59 sets bit 10, which must not leak into the hour
        let time = DosTime::from_parts(0, 59, 0);
        assert_eq!(time.hour(), 0);
        assert_eq!(time.minute(), 59);
    }

    #[test]
    fn test_date_bit_layout() {
        let date = DosDate::from_parts(2024, 12, 31);
        assert_eq!(date.raw(), (44 << 9) | (12 << 5) | 31);
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 12);
        assert_eq!(date.day(), 31);
        assert_eq!(date.to_string(), "2024-12-31");
    }

    #[test]
    fn test_date_extremes() {
        assert_eq!(DosDate(0).to_string(), "1980-00-00");
        assert_eq!(DosDate(0xffff).year(), 2107);
    }
}
