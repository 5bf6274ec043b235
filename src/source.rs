//! Byte transports the decoder can be polled against.

use std::collections::VecDeque;
use std::io;

use crate::err::SourceError;

const READ_CHUNK: usize = 64;

/// A stream that hands out one byte at a time.
///
/// `available` must not block for longer than it takes to check for
/// pending input.
pub trait ByteSource {
    fn available(&mut self) -> bool;

    /// Next byte, `None` if nothing is pending.
    fn read(&mut self) -> Option<u8>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline]
    fn available(&mut self) -> bool {
        (**self).available()
    }

    #[inline]
    fn read(&mut self) -> Option<u8> {
        (**self).read()
    }
}

impl ByteSource for VecDeque<u8> {
    #[inline]
    fn available(&mut self) -> bool {
        !self.is_empty()
    }

    #[inline]
    fn read(&mut self) -> Option<u8> {
        self.pop_front()
    }
}

/// Serves bytes out of a slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        SliceSource { bytes, pos: 0 }
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

impl ByteSource for SliceSource<'_> {
    #[inline]
    fn available(&mut self) -> bool {
        self.pos < self.bytes.len()
    }

    #[inline]
    fn read(&mut self) -> Option<u8> {
        let b = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }
}

/// Adapts any `io::Read` to a `ByteSource`, reading small chunks on demand.
///
/// End of input and I/O errors both make `available` return `false`; the
/// error is kept until taken with `take_error`. `WouldBlock` only ends the
/// current poll.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    buf: [u8; READ_CHUNK],
    start: usize,
    end: usize,
    eof: bool,
    error: Option<SourceError>,
}

impl<R: io::Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource {
            reader,
            buf: [0; READ_CHUNK],
            start: 0,
            end: 0,
            eof: false,
            error: None,
        }
    }

    /// True once the reader reported end of input or failed.
    pub fn is_exhausted(&self) -> bool {
        self.start == self.end && (self.eof || self.error.is_some())
    }

    pub fn take_error(&mut self) -> Option<SourceError> {
        self.error.take()
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill(&mut self) {
        if self.eof || self.error.is_some() {
            return;
        }
        loop {
            match self.reader.read(&mut self.buf) {
                Ok(0) => {
                    self.eof = true;
                    return;
                }
                Ok(n) => {
                    self.start = 0;
                    self.end = n;
                    return;
                }
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => return,
                Err(e) => {
                    self.error = Some(e.into());
                    return;
                }
            }
        }
    }
}

impl<R: io::Read> ByteSource for ReaderSource<R> {
    fn available(&mut self) -> bool {
        if self.start == self.end {
            self.fill();
        }
        self.start < self.end
    }

    fn read(&mut self) -> Option<u8> {
        if !self.available() {
            return None;
        }
        let b = self.buf[self.start];
        self.start += 1;
        Some(b)
    }
}
