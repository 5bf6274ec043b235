use std::{io, num, str};

use crate::reading::Field;

quick_error! {
    /// Outcome of writing into a bounded [`Text`](../text/struct.Text.html).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TextError {
        /// The input did not fit. The first `capacity` bytes were stored, the rest dropped.
        Overflow(capacity: usize, len: usize) {
            display("Tried to store {} bytes into a buffer of capacity {}", len, capacity)
        }
    }
}

quick_error! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ConfigError {
        ZeroBatchCapacity {
            display("Batch capacity must be at least one reading")
        }
        SegmentLength(len: usize, min: usize, max: usize) {
            display("Maximum segment length {} is outside of {}..={}", len, min, max)
        }
        UnknownMessage {
            display("Unknown NMEA message id")
        }
    }
}

quick_error! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum RouteError {
        /// The field was written, but did not fit into its attribute.
        Truncated(field: Field, err: TextError) {
            display("Value for {:?} was truncated: {}", field, err)
            source(err)
        }
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum CoordinateError {
        InvalidInput(msg: &'static str) {
            display("Invalid input: {}", msg)
        }
        Degrees(err: num::ParseIntError) {
            from()
            display("{}", err)
            source(err)
        }
        Minutes(err: num::ParseFloatError) {
            from()
            display("{}", err)
            source(err)
        }
        OutOfRange(val: f64, max: f64) {
            display("Invalid coordinate: {} should be between {} and {}", val, max * -1.0, max)
        }
        Utf8(err: str::Utf8Error) {
            from()
            display("Coordinate is not valid UTF-8: {}", err)
            source(err)
        }
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum SourceError {
        Io(err: io::Error) {
            from()
            display("Encountered I/O error while reading the byte source: {}", err)
            source(err)
        }
    }
}
