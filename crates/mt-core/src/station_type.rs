//! Station shapes.
//!
//! A passenger's destination is a `StationType`, satisfied by *any* station
//! of that type rather than a specific station id.

use std::str::FromStr;

use crate::CoreError;

/// The closed set of station shapes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StationType {
    Circle,
    Square,
    Triangle,
    Star,
}

impl StationType {
    /// Every variant, in declaration order.
    pub const ALL: [StationType; 4] = [
        StationType::Circle,
        StationType::Square,
        StationType::Triangle,
        StationType::Star,
    ];

    /// Lower-case label, matching the names used in level files.
    pub fn as_str(self) -> &'static str {
        match self {
            StationType::Circle   => "circle",
            StationType::Square   => "square",
            StationType::Triangle => "triangle",
            StationType::Star     => "star",
        }
    }
}

impl std::fmt::Display for StationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StationType {
    type Err = CoreError;

    /// Case-insensitive parse of [`as_str`](StationType::as_str) labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StationType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Parse(format!("unknown station type `{s}`")))
    }
}
