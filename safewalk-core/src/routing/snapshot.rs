//! Request-scoped weighted graph built from a store read.
//!
//! The snapshot is rebuilt for every route request, so danger updates
//! committed before the edge read are always reflected.

use geo::Point;
use hashbrown::HashMap;
use log::{debug, warn};

use super::RoutingMode;
use crate::{Edge, Error, NodeId, store::GraphStore};

/// Floor applied to every arc weight so that the search always makes
/// strictly monotonic progress.
pub const MIN_ARC_WEIGHT: f64 = 0.01;

/// One directed traversable connection
#[derive(Debug, Clone, PartialEq)]
pub struct GraphArc {
    pub target: NodeId,
    /// Strictly positive weight under the snapshot's mode
    pub weight: f64,
    /// Index into [`GraphSnapshot::edges`]
    pub edge: usize,
}

/// Adjacency view of the street network for one routing request
#[derive(Debug, Clone, Default)]
pub struct GraphSnapshot {
    adjacency: HashMap<NodeId, Vec<GraphArc>>,
    coordinates: HashMap<NodeId, Point<f64>>,
    edges: Vec<Edge>,
    mode: RoutingMode,
    ada_required: bool,
    excluded: usize,
}

impl GraphSnapshot {
    /// Reads every node, then every edge, from the store and builds the
    /// searchable graph.
    ///
    /// No isolation is taken across the two reads.
    ///
    /// # Errors
    ///
    /// Only store failures are propagated; an empty store yields an empty graph.
    pub fn build<S: GraphStore + ?Sized>(
        store: &S,
        mode: RoutingMode,
        ada_required: bool,
    ) -> Result<Self, Error> {
        let nodes = store.list_nodes()?;
        let mut snapshot = GraphSnapshot {
            adjacency: HashMap::with_capacity(nodes.len()),
            coordinates: HashMap::with_capacity(nodes.len()),
            edges: Vec::new(),
            mode,
            ada_required,
            excluded: 0,
        };

        for node in nodes {
            snapshot.adjacency.entry(node.id.clone()).or_default();
            snapshot.coordinates.insert(node.id, node.geometry);
        }

        let mut dangling = 0usize;
        for edge in store.list_edges()? {
            if ada_required && !edge.is_accessible {
                snapshot.excluded += 1;
                continue;
            }

            if !snapshot.coordinates.contains_key(&edge.a)
                || !snapshot.coordinates.contains_key(&edge.b)
            {
                warn!(
                    "Edge {} references unknown intersection ({} -> {}), skipping",
                    edge.id, edge.a, edge.b
                );
                dangling += 1;
                continue;
            }

            snapshot.push_edge(edge);
        }

        debug!(
            "Snapshot [{mode}, ada={ada_required}]: {} nodes, {} edges, {} excluded, {dangling} dangling",
            snapshot.adjacency.len(),
            snapshot.edges.len(),
            snapshot.excluded,
        );

        Ok(snapshot)
    }

    fn push_edge(&mut self, edge: Edge) {
        let weight = floor_weight(self.mode.raw_weight(&edge));
        let edge_idx = self.edges.len();

        if let Some(arcs) = self.adjacency.get_mut(&edge.a) {
            arcs.push(GraphArc {
                target: edge.b.clone(),
                weight,
                edge: edge_idx,
            });
        }
        if edge.bidirectional {
            if let Some(arcs) = self.adjacency.get_mut(&edge.b) {
                arcs.push(GraphArc {
                    target: edge.a.clone(),
                    weight,
                    edge: edge_idx,
                });
            }
        }

        self.edges.push(edge);
    }

    /// Outgoing arcs of a node, `None` if the node is not in the graph
    pub fn arcs(&self, node: &str) -> Option<&[GraphArc]> {
        self.adjacency.get(node).map(Vec::as_slice)
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn coordinate(&self, node: &str) -> Option<Point<f64>> {
        self.coordinates.get(node).copied()
    }

    pub fn edge(&self, idx: usize) -> Option<&Edge> {
        self.edges.get(idx)
    }

    /// Edges admitted into the searchable graph
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn arc_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn mode(&self) -> RoutingMode {
        self.mode
    }

    pub fn ada_required(&self) -> bool {
        self.ada_required
    }

    /// Number of edges removed by accessibility filtering
    pub fn excluded_count(&self) -> usize {
        self.excluded
    }
}

/// Clamps a raw weight to [`MIN_ARC_WEIGHT`]; NaN is floored as well.
pub fn floor_weight(raw: f64) -> f64 {
    raw.max(MIN_ARC_WEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Node, store::InMemoryStore};

    fn store(edges: Vec<Edge>) -> InMemoryStore {
        InMemoryStore::from_parts(
            vec![
                Node::new("a", 0.0, 0.0),
                Node::new("b", 0.0, 1.0),
                Node::new("c", 1.0, 0.0),
            ],
            edges,
        )
        .unwrap()
    }

    #[test]
    fn empty_store_builds_empty_graph() {
        let snapshot =
            GraphSnapshot::build(&InMemoryStore::new(), RoutingMode::Safest, true).unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.excluded_count(), 0);
        assert_eq!(snapshot.arc_count(), 0);
    }

    #[test]
    fn isolated_nodes_are_searchable() {
        let snapshot = GraphSnapshot::build(&store(vec![]), RoutingMode::Safest, false).unwrap();
        assert_eq!(snapshot.node_count(), 3);
        assert_eq!(snapshot.arcs("c"), Some(&[][..]));
        assert_eq!(snapshot.coordinate("b"), Some(Point::new(0.0, 1.0)));
    }

    #[test]
    fn bidirectional_edge_yields_two_equal_arcs() {
        let store = store(vec![Edge::new("ab", "a", "b", 280.0).with_danger(5.0)]);
        let snapshot = GraphSnapshot::build(&store, RoutingMode::Safest, false).unwrap();

        let forward = &snapshot.arcs("a").unwrap()[0];
        let backward = &snapshot.arcs("b").unwrap()[0];
        assert_eq!(forward.target, "b");
        assert_eq!(backward.target, "a");
        assert_eq!(forward.weight, 5.0);
        assert_eq!(forward.weight, backward.weight);
        assert_eq!(snapshot.arc_count(), 2);
    }

    #[test]
    fn one_way_edge_yields_single_arc() {
        let store = store(vec![Edge::new("ab", "a", "b", 280.0).one_way()]);
        let snapshot = GraphSnapshot::build(&store, RoutingMode::Shortest, false).unwrap();

        assert_eq!(snapshot.arcs("a").unwrap().len(), 1);
        assert!(snapshot.arcs("b").unwrap().is_empty());
        assert_eq!(snapshot.arcs("a").unwrap()[0].weight, 280.0);
    }

    #[test]
    fn degenerate_weights_are_floored() {
        let store = store(vec![
            Edge::new("ab", "a", "b", 0.0).with_danger(0.0),
            Edge::new("bc", "b", "c", -4.0).with_danger(-12.0),
            Edge::new("ca", "c", "a", f64::NAN).with_danger(f64::NAN),
        ]);

        for mode in [RoutingMode::Safest, RoutingMode::Shortest] {
            let snapshot = GraphSnapshot::build(&store, mode, false).unwrap();
            for node in ["a", "b", "c"] {
                for arc in snapshot.arcs(node).unwrap() {
                    assert!(arc.weight > 0.0, "{mode}: arc from {node} has weight {}", arc.weight);
                    assert_eq!(arc.weight, MIN_ARC_WEIGHT);
                }
            }
        }
    }

    #[test]
    fn inaccessible_edges_are_absent_only_when_required() {
        let store = store(vec![
            Edge::new("ab", "a", "b", 10.0),
            Edge::new("bc", "b", "c", 10.0).inaccessible(),
        ]);

        let open = GraphSnapshot::build(&store, RoutingMode::Shortest, false).unwrap();
        assert_eq!(open.excluded_count(), 0);
        assert_eq!(open.arc_count(), 4);

        let filtered = GraphSnapshot::build(&store, RoutingMode::Shortest, true).unwrap();
        assert_eq!(filtered.excluded_count(), 1);
        assert_eq!(filtered.arc_count(), 2);
        assert!(filtered.arcs("c").unwrap().is_empty());
        assert!(filtered.edges().iter().all(|e| e.id != "bc"));
    }

    #[test]
    fn dangling_edges_are_dropped() {
        let store = store(vec![Edge::new("ax", "a", "x", 10.0)]);
        let snapshot = GraphSnapshot::build(&store, RoutingMode::Shortest, false).unwrap();
        assert_eq!(snapshot.arc_count(), 0);
        assert_eq!(snapshot.excluded_count(), 0);
        assert!(!snapshot.contains_node("x"));
    }
}
