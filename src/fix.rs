use std::fmt;

use crate::sentence::MessageId;

/// Field of the GSA sentence that carries the fix type digit.
pub const FIX_TYPE_FIELD: usize = 2;

/// Quality of the position solution as reported by the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FixState {
    #[default]
    NoFix,
    Fix2D,
    Fix3D,
}

impl FixState {
    /// Parse the GSA fix type: `1`, `2` or `3`.
    pub fn from_digit(text: &[u8]) -> Option<Self> {
        match text {
            b"1" => Some(FixState::NoFix),
            b"2" => Some(FixState::Fix2D),
            b"3" => Some(FixState::Fix3D),
            _ => None,
        }
    }

    #[inline]
    pub fn has_fix(self) -> bool {
        self != FixState::NoFix
    }
}

impl fmt::Display for FixState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            FixState::NoFix => "no fix",
            FixState::Fix2D => "2D fix",
            FixState::Fix3D => "3D fix",
        })
    }
}

/// Edge-triggered tracker of the fix state.
#[derive(Debug, Clone, Default)]
pub struct FixStateTracker {
    current: FixState,
}

impl FixStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn current(&self) -> FixState {
        self.current
    }

    /// Whether field `index` of a `message` sentence reports the fix type.
    #[inline]
    pub fn watches(message: MessageId, index: usize) -> bool {
        message == MessageId::Gsa && index == FIX_TYPE_FIELD
    }

    /// Feed the fix type field. Returns the new state only on a transition.
    pub fn update(&mut self, text: &[u8]) -> Option<FixState> {
        let fix = match FixState::from_digit(text) {
            Some(fix) => fix,
            None => {
                trace!("ignoring fix type {:?}", String::from_utf8_lossy(text));
                return None;
            }
        };
        if fix == self.current {
            return None;
        }
        debug!("fix changed from {} to {}", self.current, fix);
        self.current = fix;
        Some(fix)
    }
}
