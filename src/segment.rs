//! Per-byte framing of the NMEA stream.
//!
//! [`ParserState`] is the whole state of the framing machine. It is fed one
//! byte at a time and yields a [`Token`] whenever a segment is finalised.
//! It never looks back at earlier input and never holds more than one
//! segment.

use std::fmt;

use crate::sentence::{self, SentenceKind};
use crate::text::Text;

/// Upper bound for the segment limit, the maximum length of a whole NMEA sentence.
pub const MAX_SEGMENT_CAPACITY: usize = 82;

const SENTENCE_START: u8 = b'$';
const FIELD_SEPARATOR: u8 = b',';
const CHECKSUM_MARKER: u8 = b'*';

/// Collects the bytes between two delimiters.
///
/// Bytes past `limit` are dropped and counted, the segment keeps its first
/// `limit` bytes.
#[derive(Clone)]
pub struct SegmentAccumulator {
    buf: Text<MAX_SEGMENT_CAPACITY>,
    limit: usize,
    dropped: usize,
}

impl SegmentAccumulator {
    pub fn new(limit: usize) -> Self {
        SegmentAccumulator {
            buf: Text::new(),
            limit: limit.min(MAX_SEGMENT_CAPACITY),
            dropped: 0,
        }
    }

    /// Returns `false` if the byte was dropped.
    #[inline]
    pub fn push(&mut self, byte: u8) -> bool {
        if self.buf.len() >= self.limit || self.buf.push(byte).is_err() {
            self.dropped += 1;
            return false;
        }
        true
    }

    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
        self.dropped = 0;
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    /// Number of bytes dropped from the current segment.
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl fmt::Debug for SegmentAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SegmentAccumulator")
            .field("buf", &self.buf)
            .field("limit", &self.limit)
            .field("dropped", &self.dropped)
            .finish()
    }
}

/// A finalised segment.
#[derive(Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// The first segment of a sentence, already classified.
    Header {
        kind: Option<SentenceKind>,
        raw: &'a [u8],
        dropped: usize,
    },
    /// Any later segment. `index` starts at 1 for the first field after the header.
    Field {
        kind: Option<SentenceKind>,
        index: usize,
        text: &'a [u8],
        dropped: usize,
    },
}

/// Framing state: `field == None` is between sentences, otherwise inside a
/// sentence of `kind` at field `field`.
#[derive(Debug, Clone)]
pub struct ParserState {
    segment: SegmentAccumulator,
    field: Option<usize>,
    kind: Option<SentenceKind>,
    // the last token borrowed the segment, clear it on the next byte
    finalised: bool,
}

impl ParserState {
    pub fn new(max_segment_len: usize) -> Self {
        ParserState {
            segment: SegmentAccumulator::new(max_segment_len),
            field: None,
            kind: None,
            finalised: false,
        }
    }

    /// Advance the machine by one byte.
    pub fn advance(&mut self, byte: u8) -> Option<Token<'_>> {
        if self.finalised {
            self.segment.clear();
            self.finalised = false;
        }

        match byte {
            SENTENCE_START => {
                if let Some(field) = self.field {
                    trace!(
                        "discarding unterminated sentence {:?} at field {}",
                        self.kind,
                        field
                    );
                }
                self.start_sentence();
                None
            }
            FIELD_SEPARATOR | CHECKSUM_MARKER => {
                let index = self.field?;
                self.finalised = true;
                self.field = match byte {
                    CHECKSUM_MARKER => None,
                    _ => Some(index.saturating_add(1)),
                };

                let dropped = self.segment.dropped();
                if index == 0 {
                    self.kind = sentence::classify(self.segment.as_bytes());
                    Some(Token::Header {
                        kind: self.kind,
                        raw: self.segment.as_bytes(),
                        dropped,
                    })
                } else {
                    Some(Token::Field {
                        kind: self.kind,
                        index,
                        text: self.segment.as_bytes(),
                        dropped,
                    })
                }
            }
            _ => {
                if self.field.is_some() {
                    self.segment.push(byte);
                }
                None
            }
        }
    }

    /// Forget any partial sentence and wait for the next `$`.
    pub fn reset(&mut self) {
        self.segment.clear();
        self.field = None;
        self.kind = None;
        self.finalised = false;
    }

    #[inline]
    pub fn is_in_sentence(&self) -> bool {
        self.field.is_some()
    }

    /// Index of the field currently being accumulated, `None` between sentences.
    #[inline]
    pub fn field_index(&self) -> Option<usize> {
        self.field
    }

    #[inline]
    pub fn kind(&self) -> Option<SentenceKind> {
        self.kind
    }

    #[inline]
    pub fn segment(&self) -> &SegmentAccumulator {
        &self.segment
    }

    fn start_sentence(&mut self) {
        self.segment.clear();
        self.field = Some(0);
        self.kind = None;
        self.finalised = false;
    }
}
