//! The position record assembled from several sentences, and the routing of
//! sentence fields into it.

use chrono::{NaiveDate, NaiveTime};

use std::str::{self, FromStr};

use crate::err::{CoordinateError, RouteError, TextError};
use crate::sentence::MessageId;
use crate::text::Text;

pub const DATE_CAPACITY: usize = 6;
pub const TIME_CAPACITY: usize = 8;
pub const LATITUDE_CAPACITY: usize = 15;
pub const LONGITUDE_CAPACITY: usize = 16;
pub const DIRECTION_CAPACITY: usize = 1;
pub const ALTITUDE_CAPACITY: usize = 7;
pub const SATELLITE_COUNT_CAPACITY: usize = 2;

const LAT_SPLIT: usize = 2;
const ABS_MAX_LAT: f64 = 90.0;
const LONG_SPLIT: usize = 3;
const ABS_MAX_LONG: f64 = 180.0;

/// One position record, transcribed verbatim from the receiver.
///
/// Attributes that no sentence has written yet are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpsReading {
    /// `ddmmyy`
    pub date: Text<DATE_CAPACITY>,
    /// `hhmmss[.sss]`, UTC
    pub time: Text<TIME_CAPACITY>,
    /// `ddmm.mmmm`
    pub latitude: Text<LATITUDE_CAPACITY>,
    /// `N` or `S`
    pub latitude_direction: Text<DIRECTION_CAPACITY>,
    /// `dddmm.mmmm`
    pub longitude: Text<LONGITUDE_CAPACITY>,
    /// `E` or `W`
    pub longitude_direction: Text<DIRECTION_CAPACITY>,
    /// Meters above mean sea level.
    pub altitude: Text<ALTITUDE_CAPACITY>,
    /// Satellites used for the solution.
    pub satellite_count: Text<SATELLITE_COUNT_CAPACITY>,
}

/// An attribute of [`GpsReading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Date,
    Time,
    Latitude,
    LatitudeDirection,
    Longitude,
    LongitudeDirection,
    Altitude,
    SatelliteCount,
}

impl Field {
    /// Capacity of the attribute in bytes.
    pub fn capacity(self) -> usize {
        match self {
            Field::Date => DATE_CAPACITY,
            Field::Time => TIME_CAPACITY,
            Field::Latitude => LATITUDE_CAPACITY,
            Field::LatitudeDirection | Field::LongitudeDirection => DIRECTION_CAPACITY,
            Field::Longitude => LONGITUDE_CAPACITY,
            Field::Altitude => ALTITUDE_CAPACITY,
            Field::SatelliteCount => SATELLITE_COUNT_CAPACITY,
        }
    }
}

/// The attribute that field `index` of a `message` sentence is copied into.
///
/// ```text
/// $GPRMC,074318.00,A,4735.41382,N,12212.35088,W,0.030,,170617,,,A*63
///        ^^^^^^^^^   ^^^^^^^^^^ ^ ^^^^^^^^^^^ ^        ^^^^^^
///        1           3          4 5           6        9
///
/// $GPGGA,074318.00,4735.41382,N,12212.35088,W,1,08,0.9,545.4,M,46.9,M,,*47
///                                               ^^     ^^^^^
///                                               7      9
/// ```
pub fn field_for(message: MessageId, index: usize) -> Option<Field> {
    match (message, index) {
        (MessageId::Rmc, 1) => Some(Field::Time),
        (MessageId::Rmc, 3) => Some(Field::Latitude),
        (MessageId::Rmc, 4) => Some(Field::LatitudeDirection),
        (MessageId::Rmc, 5) => Some(Field::Longitude),
        (MessageId::Rmc, 6) => Some(Field::LongitudeDirection),
        (MessageId::Rmc, 9) => Some(Field::Date),
        (MessageId::Gga, 7) => Some(Field::SatelliteCount),
        (MessageId::Gga, 9) => Some(Field::Altitude),
        _ => None,
    }
}

/// Copy `text` into the attribute `field_for(message, index)` of `reading`.
///
/// Returns the written attribute, `None` when the field is not extracted.
/// Oversized values are stored truncated and reported as `RouteError::Truncated`.
pub fn route(
    reading: &mut GpsReading,
    message: MessageId,
    index: usize,
    text: &[u8],
) -> Result<Option<Field>, RouteError> {
    match field_for(message, index) {
        Some(field) => reading
            .set(field, text)
            .map(|()| Some(field))
            .map_err(|e| RouteError::Truncated(field, e)),
        None => Ok(None),
    }
}

impl GpsReading {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one attribute as a whole.
    pub fn set(&mut self, field: Field, text: &[u8]) -> Result<(), TextError> {
        match field {
            Field::Date => self.date.set(text),
            Field::Time => self.time.set(text),
            Field::Latitude => self.latitude.set(text),
            Field::LatitudeDirection => self.latitude_direction.set(text),
            Field::Longitude => self.longitude.set(text),
            Field::LongitudeDirection => self.longitude_direction.set(text),
            Field::Altitude => self.altitude.set(text),
            Field::SatelliteCount => self.satellite_count.set(text),
        }
    }

    pub fn get(&self, field: Field) -> &[u8] {
        match field {
            Field::Date => self.date.as_bytes(),
            Field::Time => self.time.as_bytes(),
            Field::Latitude => self.latitude.as_bytes(),
            Field::LatitudeDirection => self.latitude_direction.as_bytes(),
            Field::Longitude => self.longitude.as_bytes(),
            Field::LongitudeDirection => self.longitude_direction.as_bytes(),
            Field::Altitude => self.altitude.as_bytes(),
            Field::SatelliteCount => self.satellite_count.as_bytes(),
        }
    }

    /// True if no attribute has been written.
    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
            && self.time.is_empty()
            && self.latitude.is_empty()
            && self.latitude_direction.is_empty()
            && self.longitude.is_empty()
            && self.longitude_direction.is_empty()
            && self.altitude.is_empty()
            && self.satellite_count.is_empty()
    }

    /// The time of day in UTC, `None` if absent or malformed.
    pub fn utc_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(self.time.as_str()?, "%H%M%S%.f").ok()
    }

    /// The date, `None` if absent or malformed.
    pub fn utc_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.as_str()?, "%d%m%y").ok()
    }

    /// Latitude in signed decimal degrees, positive in the northern hemisphere.
    pub fn latitude_degrees(&self) -> Result<Option<f64>, CoordinateError> {
        if self.latitude.is_empty() {
            return Ok(None);
        }
        let sign = match self.latitude_direction.as_bytes() {
            b"N" => 1.0,
            b"S" => -1.0,
            _ => return Err(CoordinateError::InvalidInput("latitude needs N or S")),
        };
        parse_coord(self.latitude.as_bytes(), sign, LAT_SPLIT, ABS_MAX_LAT).map(Some)
    }

    /// Longitude in signed decimal degrees, positive in the eastern hemisphere.
    pub fn longitude_degrees(&self) -> Result<Option<f64>, CoordinateError> {
        if self.longitude.is_empty() {
            return Ok(None);
        }
        let sign = match self.longitude_direction.as_bytes() {
            b"E" => 1.0,
            b"W" => -1.0,
            _ => return Err(CoordinateError::InvalidInput("longitude needs E or W")),
        };
        parse_coord(self.longitude.as_bytes(), sign, LONG_SPLIT, ABS_MAX_LONG).map(Some)
    }

    pub fn satellites(&self) -> Option<u8> {
        u8::from_str(self.satellite_count.as_str()?).ok()
    }

    pub fn altitude_meters(&self) -> Option<f64> {
        f64::from_str(self.altitude.as_str()?).ok()
    }
}

/// Parse `coord` (`ddmm.mmmm`) as decimal degrees.
/// `deg_split` is the number of digits that make up the degrees.
/// `abs_max` is maximum value in degree, e.g. 180 for longitude.
fn parse_coord(
    coord: &[u8],
    sign: f64,
    deg_split: usize,
    abs_max: f64,
) -> Result<f64, CoordinateError> {
    // This check is needed to ensure we don't panic
    if deg_split > coord.len() {
        return Err(CoordinateError::InvalidInput(
            "the value is too short for a coordinate",
        ));
    }

    let (deg, dec_min) = coord.split_at(deg_split);
    let degrees = f64::from(u8::from_str(str::from_utf8(deg)?)?);
    let minutes = f64::from_str(str::from_utf8(dec_min)?)?;
    if !(0.0..60.0).contains(&minutes) {
        return Err(CoordinateError::InvalidInput("minutes must be below 60"));
    }
    let dec_deg = degrees + minutes / 60.0;
    if dec_deg > abs_max {
        return Err(CoordinateError::OutOfRange(dec_deg, abs_max));
    }
    Ok(dec_deg * sign)
}
