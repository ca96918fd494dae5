//! Street network components - intersections and street segments

use chrono::{DateTime, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};

use crate::{EdgeId, NodeId};

/// Upper bound of the danger scale
pub const MAX_DANGER: f64 = 100.0;

/// Street graph node (intersection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Opaque, stable identifier
    pub id: NodeId,
    /// Node coordinates, x is longitude and y is latitude
    pub geometry: Point<f64>,
    /// Human readable name, e.g. "Pine St & Rolla St"
    #[serde(default)]
    pub name: String,
    /// Informational tags such as `well_lit`, never consumed by routing
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, lon: f64, lat: f64) -> Self {
        Self {
            id: id.into(),
            geometry: Point::new(lon, lat),
            name: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// `[lon, lat]` pair
    pub fn lon_lat(&self) -> [f64; 2] {
        [self.geometry.x(), self.geometry.y()]
    }
}

/// Street graph edge (street segment)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    /// Start intersection
    pub a: NodeId,
    /// End intersection
    pub b: NodeId,
    /// Street name, matched by hazard observations
    #[serde(default)]
    pub name: String,
    /// Physical length in meters
    pub distance_m: f64,
    /// Dynamic danger weight on a 0-100 scale
    #[serde(default)]
    pub danger_score: f64,
    /// Static risk factor, carried for future weighting blends
    #[serde(default)]
    pub base_weight: f64,
    #[serde(default = "default_true")]
    pub bidirectional: bool,
    #[serde(default = "default_true")]
    pub is_accessible: bool,
    /// Bumped by the store on every danger update
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl Edge {
    /// Creates a bidirectional, accessible edge with no danger recorded
    pub fn new(
        id: impl Into<EdgeId>,
        a: impl Into<NodeId>,
        b: impl Into<NodeId>,
        distance_m: f64,
    ) -> Self {
        Self {
            id: id.into(),
            a: a.into(),
            b: b.into(),
            name: String::new(),
            distance_m,
            danger_score: 0.0,
            base_weight: 0.0,
            bidirectional: true,
            is_accessible: true,
            version: 0,
            updated_at: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_danger(mut self, danger_score: f64) -> Self {
        self.danger_score = danger_score;
        self
    }

    pub fn with_base_weight(mut self, base_weight: f64) -> Self {
        self.base_weight = base_weight;
        self
    }

    pub fn one_way(mut self) -> Self {
        self.bidirectional = false;
        self
    }

    pub fn inaccessible(mut self) -> Self {
        self.is_accessible = false;
        self
    }

    /// Case-insensitive substring match against the street name
    pub fn name_matches(&self, pattern: &str) -> bool {
        self.name.to_lowercase().contains(&pattern.to_lowercase())
    }
}
