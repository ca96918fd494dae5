//! Safety-weighted routing over the street network
//!
//! A route request builds a fresh [`GraphSnapshot`] from the store and runs
//! Dijkstra over it; nothing is cached between requests.

pub mod dijkstra;
mod itinerary;
mod mode;
mod route;
mod snapshot;

pub use dijkstra::{dijkstra_path, dijkstra_path_weights, round_cost};
pub use mode::RoutingMode;
pub use route::{PathResult, RouteRequest, compute_route};
pub use snapshot::{GraphArc, GraphSnapshot, MIN_ARC_WEIGHT, floor_weight};
