//! Safety-weighted pedestrian routing core.
//!
//! Builds a weighted street graph from a [`store::GraphStore`] for every
//! query, routes over it by danger or by distance with optional
//! wheelchair-accessibility filtering, and blends hazard observations
//! into street danger scores.

mod error;
pub mod hazard;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod store;

pub use error::Error;
pub use hazard::{BlendReport, HazardObservation, apply_hazard_observation};
pub use loading::{DatasetConfig, create_graph_store};
pub use model::{Edge, Node, streets::components::MAX_DANGER};
pub use routing::{GraphSnapshot, PathResult, RouteRequest, RoutingMode, compute_route};

/// Opaque intersection identifier
pub type NodeId = String;
/// Opaque street segment identifier
pub type EdgeId = String;

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
