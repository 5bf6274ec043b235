//! Fixed-capacity owned text.
//!
//! NMEA fields are transcribed byte for byte, so `Text` stores raw bytes and
//! only interprets them as UTF-8 on request.

use arrayvec::ArrayVec;

use std::{fmt, str};

use crate::err::TextError;

/// A text buffer holding at most `N` bytes.
///
/// Writes never exceed the capacity. A write that does not fit stores its
/// first `N` bytes and reports the truncation as `TextError::Overflow`.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Text<const N: usize> {
    buf: ArrayVec<u8, N>,
}

impl<const N: usize> Text<N> {
    pub const CAPACITY: usize = N;

    pub fn new() -> Self {
        Text {
            buf: ArrayVec::new(),
        }
    }

    /// Replace the contents with `bytes`, truncated to the capacity.
    pub fn set(&mut self, bytes: &[u8]) -> Result<(), TextError> {
        self.buf.clear();
        let take = bytes.len().min(N);
        self.buf.extend(bytes[..take].iter().cloned());
        if bytes.len() > N {
            return Err(TextError::Overflow(N, bytes.len()));
        }
        Ok(())
    }

    /// Append a single byte, leaving the contents untouched if full.
    #[inline]
    pub fn push(&mut self, byte: u8) -> Result<(), TextError> {
        self.buf
            .try_push(byte)
            .map_err(|_| TextError::Overflow(N, N + 1))
    }

    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.buf.is_full()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// The contents as `&str`, `None` if the receiver sent non UTF-8 bytes.
    pub fn as_str(&self) -> Option<&str> {
        str::from_utf8(&self.buf).ok()
    }
}

impl<const N: usize> PartialEq<str> for Text<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<'a, const N: usize> PartialEq<&'a str> for Text<N> {
    fn eq(&self, other: &&'a str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> fmt::Display for Text<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.buf))
    }
}

impl<const N: usize> fmt::Debug for Text<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_within_capacity() {
        let mut t = Text::<6>::new();
        assert_matches!(t.set(b"170617"), Ok(()));
        assert_eq!(t, "170617");
        assert!(t.is_full());
    }

    #[test]
    fn set_truncates_and_reports() {
        let mut t = Text::<8>::new();
        assert_matches!(t.set(b"074318.00"), Err(TextError::Overflow(8, 9)));
        assert_eq!(t, "074318.0");
    }

    #[test]
    fn set_keeps_prefix_of_long_input() {
        let mut t = Text::<4>::new();
        t.set(b"xy").unwrap();
        assert_matches!(t.set(&[b'7'; 100]), Err(TextError::Overflow(4, 100)));
        assert_eq!(t, "7777");
        assert_matches!(t.set(b"1234"), Ok(()));
        assert_eq!(t, "1234");
    }

    #[test]
    fn set_replaces_previous_value() {
        let mut t = Text::<4>::new();
        t.set(b"abcd").unwrap();
        t.set(b"x").unwrap();
        assert_eq!(t, "x");
        t.set(b"").unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn push_stops_at_capacity() {
        let mut t = Text::<2>::new();
        assert_matches!(t.push(b'0'), Ok(()));
        assert_matches!(t.push(b'8'), Ok(()));
        assert_matches!(t.push(b'9'), Err(TextError::Overflow(2, 3)));
        assert_eq!(t, "08");
    }

    #[test]
    fn non_utf8_is_kept_verbatim() {
        let mut t = Text::<4>::new();
        t.set(&[0xff, b'A']).unwrap();
        assert_eq!(t.as_bytes(), &[0xff, b'A']);
        assert_eq!(t.as_str(), None);
    }
}
