//! Classification of the header segment (`GPRMC`, `GNGGA`, ...) of a sentence.

use std::fmt;
use std::str::FromStr;

use crate::err::ConfigError;

/// Length of the header: two talker characters followed by three message characters.
pub const HEADER_LENGTH: usize = 5;
const TALKER_LENGTH: usize = 2;

wire_ids! {
    /// The receiver subsystem that produced a sentence.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Talker {
        /// GPS
        Gp = "GP",
        /// Combined GNSS solution
        Gn = "GN",
        /// GLONASS
        Gl = "GL",
    }
}

wire_ids! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum MessageId {
        /// Recommended minimum data: time, date, position, course and speed.
        Rmc = "RMC",
        /// Time, position and fix related data.
        Gga = "GGA",
        /// Dilution of precision and active satellites, carries the fix type.
        Gsa = "GSA",
        /// Satellites in view.
        Gsv = "GSV",
        /// Geographic position.
        Gll = "GLL",
        /// Course and speed over ground.
        Vtg = "VTG",
    }
}

impl FromStr for MessageId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageId::from_mnemonic(s.as_bytes()).ok_or(ConfigError::UnknownMessage)
    }
}

/// A recognised `talker + message` combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SentenceKind {
    pub talker: Talker,
    pub message: MessageId,
}

impl fmt::Display for SentenceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.talker, self.message)
    }
}

const fn header_key(talker: Talker, message: MessageId) -> [u8; HEADER_LENGTH] {
    let t = talker.mnemonic().as_bytes();
    let m = message.mnemonic().as_bytes();
    [t[0], t[1], m[0], m[1], m[2]]
}

sentence_table! {
    Gp Rmc; Gn Rmc; Gl Rmc;
    Gp Gga; Gn Gga; Gl Gga;
    Gp Gsa; Gn Gsa; Gl Gsa;
    Gp Gsv; Gn Gsv; Gl Gsv;
    Gp Gll; Gn Gll; Gl Gll;
    Gp Vtg; Gn Vtg; Gl Vtg;
}

/// Map the first segment of a sentence onto its kind.
///
/// Talker and message are compared at their fixed offsets (`0..2` and
/// `2..5`). Returns `None` for anything outside of the table, including
/// segments shorter than a header.
pub fn classify(segment: &[u8]) -> Option<SentenceKind> {
    let key = segment.get(..HEADER_LENGTH)?;
    SENTENCE_TABLE
        .iter()
        .find(|(header, _)| header[..] == *key)
        .map(|&(_, kind)| kind)
}

/// The talker of a header, even when the message is not recognised.
pub fn talker_of(segment: &[u8]) -> Option<Talker> {
    Talker::from_mnemonic(segment.get(..TALKER_LENGTH)?)
}
