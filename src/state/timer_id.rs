//! Timer slot identifiers

use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

/// One of the fixed timer slots the service knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerId {
    /// The main countdown shown on the page
    Default,
    /// Short countdown used for confirmation prompts
    Confirm,
}

impl TimerId {
    /// Every known timer slot, in display order
    pub const ALL: [TimerId; 2] = [TimerId::Default, TimerId::Confirm];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerId::Default => "default",
            TimerId::Confirm => "confirm",
        }
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimerId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimerId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("Unknown timer id: {}", s))
    }
}
