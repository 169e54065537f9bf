//! User classes, hours and quantity kinds

use super::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Behavioral user class
///
/// High/Medium/Low traffic volume crossed with Frequent/Occasional cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UserClass {
    HF,
    HO,
    MF,
    MO,
    LF,
    LO,
}

impl UserClass {
    pub const ALL: [UserClass; 6] = [
        UserClass::HF,
        UserClass::HO,
        UserClass::MF,
        UserClass::MO,
        UserClass::LF,
        UserClass::LO,
    ];

    /// Two-letter label used in trace files
    pub fn as_str(&self) -> &'static str {
        match self {
            UserClass::HF => "HF",
            UserClass::HO => "HO",
            UserClass::MF => "MF",
            UserClass::MO => "MO",
            UserClass::LF => "LF",
            UserClass::LO => "LO",
        }
    }

    /// Row of this class in the catalog tables
    #[inline]
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for UserClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserClass::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| Error::UnknownClass(s.to_string()))
    }
}

/// Quantity a distribution describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityKind {
    /// Whole-hour byte volume
    Volume,
    /// Seconds between consecutive requests
    InterArrivalTime,
    /// Requests in one hour
    RequestCount,
}

impl QuantityKind {
    pub const ALL: [QuantityKind; 3] = [
        QuantityKind::Volume,
        QuantityKind::InterArrivalTime,
        QuantityKind::RequestCount,
    ];

    #[inline]
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

/// Hour of the simulated day, always in 1..=23
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hour(u32);

impl Hour {
    pub const FIRST: u32 = 1;
    pub const LAST: u32 = 23;
    /// Number of modeled hours
    pub const COUNT: usize = 23;

    pub fn new(hour: u32) -> Result<Self, Error> {
        if (Self::FIRST..=Self::LAST).contains(&hour) {
            Ok(Self(hour))
        } else {
            Err(Error::InvalidHour(hour))
        }
    }

    /// Hours 1 through 23 in order
    pub fn all() -> impl Iterator<Item = Hour> {
        (Self::FIRST..=Self::LAST).map(Hour)
    }

    #[inline]
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Zero-based slot for per-hour arrays
    #[inline]
    pub(crate) fn slot(&self) -> usize {
        (self.0 - Self::FIRST) as usize
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
