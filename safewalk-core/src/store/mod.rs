//! Graph store seam
//!
//! Routing and hazard blending only need a read snapshot of nodes and edges
//! plus a point update of one edge's danger score. Any persistence engine
//! can sit behind [`GraphStore`]; [`InMemoryStore`] is the bundled one.

mod memory;

pub use memory::InMemoryStore;

use crate::{Edge, EdgeId, Error, Node};

/// Black-box store operations consumed by the routing core.
///
/// Implementations must replace edge records atomically: a reader sees an
/// edge either entirely before or entirely after an update.
pub trait GraphStore: Send + Sync {
    /// All nodes, in a stable order
    fn list_nodes(&self) -> Result<Vec<Node>, Error>;

    /// All edges, in a stable order
    fn list_edges(&self) -> Result<Vec<Edge>, Error>;

    fn get_edge(&self, id: &str) -> Result<Option<Edge>, Error>;

    /// Compare-and-swap update of `danger_score`.
    ///
    /// Returns `Ok(false)` when the stored version no longer equals
    /// `expected_version`, and [`Error::EdgeNotFound`] for an unknown id.
    fn update_edge_danger(
        &self,
        id: &str,
        expected_version: u64,
        new_score: f64,
    ) -> Result<bool, Error>;
}

impl<S: GraphStore + ?Sized> GraphStore for std::sync::Arc<S> {
    fn list_nodes(&self) -> Result<Vec<Node>, Error> {
        (**self).list_nodes()
    }

    fn list_edges(&self) -> Result<Vec<Edge>, Error> {
        (**self).list_edges()
    }

    fn get_edge(&self, id: &str) -> Result<Option<Edge>, Error> {
        (**self).get_edge(id)
    }

    fn update_edge_danger(
        &self,
        id: &str,
        expected_version: u64,
        new_score: f64,
    ) -> Result<bool, Error> {
        (**self).update_edge_danger(id, expected_version, new_score)
    }
}

pub(crate) fn missing_edge(id: &str) -> Error {
    Error::EdgeNotFound(EdgeId::from(id))
}
