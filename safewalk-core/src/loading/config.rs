use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Locations of the street network dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// CSV with `id,lon,lat,name,tags`
    pub nodes_path: PathBuf,
    /// CSV with `id,a,b,name,distance_m,danger_score,base_weight,bidirectional,is_accessible`
    pub edges_path: PathBuf,
}

impl DatasetConfig {
    pub fn new(nodes_path: impl Into<PathBuf>, edges_path: impl Into<PathBuf>) -> Self {
        Self {
            nodes_path: nodes_path.into(),
            edges_path: edges_path.into(),
        }
    }
}
