//! Streaming decoder for the *NMEA 0183* output of a GNSS receiver.
//!
//! Bytes are consumed one at a time, fields are copied verbatim into
//! [`GpsReading`]s, completed readings are batched for a [`ReadingSink`] and
//! fix type transitions are reported as they happen.
//!
//! ```
//! use nmea_batch::{DecoderConfig, FnSink, GpsDecoder};
//!
//! let mut batches = 0;
//! let sink = FnSink::new(|_: &[_]| batches += 1, |_| ());
//! let mut decoder = GpsDecoder::new(DecoderConfig::default(), sink).unwrap();
//! decoder.feed(b"$GPRMC,074318.00,A,4735.41382,N,12212.35088,W,0.030,,170617,,,A*63\r\n");
//! assert_eq!(decoder.active_reading().date, "170617");
//! decoder.stop();
//! drop(decoder);
//! assert_eq!(batches, 1);
//! ```

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
#[macro_use]
extern crate log;
#[macro_use]
extern crate quick_error;

pub mod err;
#[macro_use]
mod macros;
pub mod batch;
pub mod config;
pub mod decoder;
pub mod fix;
pub mod reading;
pub mod segment;
pub mod sentence;
pub mod sink;
pub mod source;
pub mod text;

pub use batch::ReadingBatch;
pub use config::DecoderConfig;
pub use decoder::GpsDecoder;
pub use err::{ConfigError, CoordinateError, RouteError, SourceError, TextError};
pub use fix::{FixState, FixStateTracker};
pub use reading::{Field, GpsReading};
pub use segment::{ParserState, SegmentAccumulator, Token};
pub use sentence::{MessageId, SentenceKind, Talker};
pub use sink::{FnSink, ReadingSink};
pub use source::{ByteSource, ReaderSource, SliceSource};
pub use text::Text;
