//! `PolicyKind`: the built-in policies by name.

use std::fmt;
use std::str::FromStr;

use mt_core::CoreError;

use crate::{AgingPriority, BoardingPolicy, Fifo, ShortestRemainingHops};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PolicyKind {
    #[default]
    Fifo,
    ShortestRemainingHops,
    AgingPriority,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [
        PolicyKind::Fifo,
        PolicyKind::ShortestRemainingHops,
        PolicyKind::AgingPriority,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Fifo                  => "fifo",
            PolicyKind::ShortestRemainingHops => "shortest_remaining_hops",
            PolicyKind::AgingPriority         => "aging_priority",
        }
    }

    /// Instantiate the policy this kind names.
    pub fn into_policy(self) -> Box<dyn BoardingPolicy> {
        match self {
            PolicyKind::Fifo                  => Box::new(Fifo),
            PolicyKind::ShortestRemainingHops => Box::new(ShortestRemainingHops),
            PolicyKind::AgingPriority         => Box::new(AgingPriority),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = CoreError;

    /// Accepts the `as_str` labels case-insensitively, with `-` or `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().replace('-', "_");
        PolicyKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(&norm))
            .ok_or_else(|| CoreError::Parse(format!("unknown boarding policy `{s}`")))
    }
}
