//! Location of the (possibly compressed) payload that follows a header.

use crate::hex;

/// The content bytes of one entry, as far as the input reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentPreview<'a> {
    /// Absolute offset of the first content byte
    pub start: usize,
    /// Compressed size declared in the header
    pub declared_len: u32,
    /// Available content bytes, clamped to the end of the input
    pub data: &'a [u8],
}

impl<'a> ContentPreview<'a> {
    /// Slices `declared_len` bytes starting at `start`, clamped to `input`.
    pub fn locate(input: &'a [u8], start: usize, declared_len: u32) -> Self {
        let tail = input.get(start..).unwrap_or_default();
        let len = usize::try_from(declared_len).map_or(tail.len(), |len| len.min(tail.len()));
        Self {
            start,
            declared_len,
            data: &tail[..len],
        }
    }

    /// Returns true if the input ends before the declared size
    pub fn is_truncated(&self) -> bool {
        (self.data.len() as u64) < u64::from(self.declared_len)
    }

    /// Abbreviated hex rendering of the available bytes
    pub fn abbreviated(&self, max_len: usize) -> String {
        hex::abbreviate(self.data, max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_exact() {
        let input = [0u8, 1, 2, 3, 4, 5, 6, 7];
        let preview = ContentPreview::locate(&input, 2, 4);
        assert_eq!(preview.data, &[2, 3, 4, 5]);
        assert!(!preview.is_truncated());
        assert_eq!(preview.abbreviated(16), "02030405");
    }

    #[test]
    fn test_locate_clamps_to_input() {
        let input = [0u8, 1, 2, 3];
        let preview = ContentPreview::locate(&input, 2, 100);
        assert_eq!(preview.data, &[2, 3]);
        assert_eq!(preview.declared_len, 100);
        assert!(preview.is_truncated());
    }

    #[test]
    fn test_zero_length_content() {
        let input = [0u8; 4];
        let preview = ContentPreview::locate(&input, 4, 0);
        assert!(preview.data.is_empty());
        assert!(!preview.is_truncated());
        assert_eq!(preview.abbreviated(16), "");
    }

    #[test]
    fn test_start_past_end() {
        let preview = ContentPreview::locate(&[], 10, 5);
        assert!(preview.data.is_empty());
        assert!(preview.is_truncated());
    }

    #[test]
    fn test_long_content_is_abbreviated() {
        let input: Vec<u8> = (0..64).collect();
        let preview = ContentPreview::locate(&input, 0, 64);
        assert_eq!(preview.abbreviated(4), "0001...3e3f");
    }
}
