use std::fmt::{Debug, Formatter};

/// A string short enough to live inline in the payload word.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SmallString {
    len: u8,
    bytes: [u8; SmallString::CAPACITY],
}

impl SmallString {
    /// Maximum number of bytes stored inline.
    pub const CAPACITY: usize = 7;

    /// Returns `None` if `value` does not fit inline.
    pub fn new(value: &str) -> Option<Self> {
        if value.len() > Self::CAPACITY {
            return None;
        }
        let len = u8::try_from(value.len()).ok()?;
        let mut bytes = [0u8; Self::CAPACITY];
        bytes[..value.len()].copy_from_slice(value.as_bytes());
        Some(Self { len, bytes })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: the bytes were copied from a `&str` in `new` and are never mutated.
        unsafe { std::str::from_utf8_unchecked(self.as_bytes()) }
    }
}

impl Debug for SmallString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self.as_str(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_inline() {
        let s = SmallString::new("abcdefg").unwrap();
        assert_eq!(s.len(), 7);
        assert_eq!(s.as_str(), "abcdefg");
        assert!(SmallString::new("abcdefgh").is_none());
    }

    #[test]
    fn empty() {
        let s = SmallString::new("").unwrap();
        assert!(s.is_empty());
        assert_eq!(s.as_bytes(), b"");
    }

    #[test]
    fn multibyte() {
        let s = SmallString::new("héé").unwrap();
        assert_eq!(s.len(), 5);
        assert_eq!(s.as_str(), "héé");

        let full = SmallString::new("éééa").unwrap();
        assert_eq!(full.len(), SmallString::CAPACITY);
        assert_eq!(full.as_str(), "éééa");
        assert!(SmallString::new("éééé").is_none());
    }
}
