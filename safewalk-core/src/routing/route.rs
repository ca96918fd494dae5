use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};

use super::{GraphSnapshot, RoutingMode, dijkstra_path};
use crate::{EdgeId, Error, NodeId, store::GraphStore};

/// Route query between two intersections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub origin: NodeId,
    pub destination: NodeId,
    #[serde(default)]
    pub mode: RoutingMode,
    /// When set, edges flagged inaccessible are removed from the graph
    #[serde(default)]
    pub ada_required: bool,
}

impl RouteRequest {
    pub fn new(origin: impl Into<NodeId>, destination: impl Into<NodeId>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            mode: RoutingMode::default(),
            ada_required: false,
        }
    }

    pub fn mode(mut self, mode: RoutingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn ada_required(mut self, ada_required: bool) -> Self {
        self.ada_required = ada_required;
        self
    }
}

/// Optimal path between two intersections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Node ids from origin to destination inclusive
    pub path: Vec<NodeId>,
    /// `[lon, lat]` of every node in `path`
    pub coordinates: Vec<[f64; 2]>,
    /// Traversed edge ids, one fewer than `path`
    pub edges: Vec<EdgeId>,
    pub total_cost: f64,
    pub mode: RoutingMode,
    pub ada_required: bool,
    /// Edges removed by accessibility filtering
    pub hazards_bypassed: usize,
}

impl PathResult {
    pub fn line_string(&self) -> LineString<f64> {
        self.coordinates
            .iter()
            .map(|&[x, y]| Coord { x, y })
            .collect()
    }
}

/// Builds a snapshot for the request's mode and accessibility filter and
/// solves it.
///
/// # Errors
///
/// [`Error::NodeNotFound`] / [`Error::NoPathExists`] from the solver, or
/// any store failure encountered while reading the graph.
pub fn compute_route<S: GraphStore + ?Sized>(
    store: &S,
    request: &RouteRequest,
) -> Result<PathResult, Error> {
    let snapshot = GraphSnapshot::build(store, request.mode, request.ada_required)?;
    dijkstra_path(&snapshot, &request.origin, &request.destination)
}
