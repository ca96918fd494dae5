use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Edge, Error};

/// Routing objective
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMode {
    /// Minimize cumulative `danger_score`
    #[default]
    Safest,
    /// Minimize cumulative `distance_m`
    Shortest,
}

impl RoutingMode {
    /// Raw scalar weight of an edge under this mode, before flooring
    pub fn raw_weight(self, edge: &Edge) -> f64 {
        match self {
            RoutingMode::Safest => edge.danger_score,
            RoutingMode::Shortest => edge.distance_m,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoutingMode::Safest => "safest",
            RoutingMode::Shortest => "shortest",
        }
    }
}

impl fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoutingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "safest" => Ok(RoutingMode::Safest),
            "shortest" => Ok(RoutingMode::Shortest),
            other => Err(Error::InvalidData(format!(
                "Unknown routing mode '{other}', expected 'safest' or 'shortest'"
            ))),
        }
    }
}
