// Re-export key components
pub use crate::Error;
pub use crate::hazard::{BlendReport, DangerUpdate, HazardObservation, apply_hazard_observation};
pub use crate::loading::{DatasetConfig, create_graph_store};
pub use crate::model::{Edge, Node};
pub use crate::routing::{
    GraphSnapshot, PathResult, RouteRequest, RoutingMode, compute_route, dijkstra_path,
    dijkstra_path_weights,
};
pub use crate::store::{GraphStore, InMemoryStore};

// Core identifier types
pub use crate::EdgeId;
pub use crate::NodeId;
