use crate::err::ConfigError;
use crate::segment::MAX_SEGMENT_CAPACITY;
use crate::sentence::{MessageId, HEADER_LENGTH};

pub const DEFAULT_BATCH_CAPACITY: usize = 10;
pub const DEFAULT_MAX_SEGMENT_LEN: usize = 13;

/// Per-deployment settings of a [`GpsDecoder`](../decoder/struct.GpsDecoder.html).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Readings per batch handed to the sink.
    pub batch_capacity: usize,
    /// Bytes kept per segment, longer segments are truncated.
    pub max_segment_len: usize,
    /// Message that opens a new reading.
    pub boundary: MessageId,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            batch_capacity: DEFAULT_BATCH_CAPACITY,
            max_segment_len: DEFAULT_MAX_SEGMENT_LEN,
            boundary: MessageId::Rmc,
        }
    }
}

impl DecoderConfig {
    pub fn with_batch_capacity(mut self, capacity: usize) -> Self {
        self.batch_capacity = capacity;
        self
    }

    pub fn with_max_segment_len(mut self, len: usize) -> Self {
        self.max_segment_len = len;
        self
    }

    pub fn with_boundary(mut self, boundary: MessageId) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_capacity == 0 {
            return Err(ConfigError::ZeroBatchCapacity);
        }
        // a shorter limit cuts every header before it can be classified
        if self.max_segment_len < HEADER_LENGTH || self.max_segment_len > MAX_SEGMENT_CAPACITY {
            return Err(ConfigError::SegmentLength(
                self.max_segment_len,
                HEADER_LENGTH,
                MAX_SEGMENT_CAPACITY,
            ));
        }
        Ok(())
    }
}
