use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Coarse research effort selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Low,
    Medium,
    High,
}

/// Concrete run parameters derived from an [`Effort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffortConfig {
    /// Initial number of search queries the agent generates.
    pub query_count: u32,
    /// Maximum research/reflection loops.
    pub loop_count: u32,
}

impl Effort {
    pub const ALL: [Effort; 3] = [Effort::Low, Effort::Medium, Effort::High];

    /// Effort policy: total over the closed selector set.
    pub fn config(self) -> EffortConfig {
        let (query_count, loop_count) = match self {
            Effort::Low => (1, 1),
            Effort::Medium => (3, 3),
            Effort::High => (5, 10),
        };
        EffortConfig {
            query_count,
            loop_count,
        }
    }

    /// Next selector in display order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Effort::Low => Effort::Medium,
            Effort::Medium => Effort::High,
            Effort::High => Effort::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Effort::Low => "low",
            Effort::Medium => "medium",
            Effort::High => "high",
        }
    }
}

impl Default for Effort {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Effort {
    type Err = ConfigError;

    /// Exact, case-sensitive match. Anything else is rejected rather than
    /// mapped to a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Effort::Low),
            "medium" => Ok(Effort::Medium),
            "high" => Ok(Effort::High),
            other => Err(ConfigError::UnknownEffort(other.to_string())),
        }
    }
}
