use std::collections::BinaryHeap;

use hashbrown::HashMap;
use log::info;

use super::state::State;
use crate::{
    Error,
    routing::{GraphSnapshot, PathResult},
};

/// Decimal places kept in a reported route cost
const COST_PRECISION: i32 = 4;

/// Rounds an accumulated route cost the way [`PathResult::total_cost`] reports it
pub fn round_cost(cost: f64) -> f64 {
    crate::round_to(cost, COST_PRECISION)
}

/// Single-source Dijkstra with early exit at `destination`.
///
/// Costs accumulate at full precision; only the reported total is rounded.
/// Relaxation requires a strict improvement, so among equal-cost paths the
/// first one discovered is kept.
///
/// # Errors
///
/// [`Error::NodeNotFound`] if either endpoint is absent from the snapshot,
/// [`Error::NoPathExists`] if the destination is never reached.
pub fn dijkstra_path(
    snapshot: &GraphSnapshot,
    origin: &str,
    destination: &str,
) -> Result<PathResult, Error> {
    if !snapshot.contains_node(origin) {
        return Err(Error::NodeNotFound(origin.into()));
    }
    if !snapshot.contains_node(destination) {
        return Err(Error::NodeNotFound(destination.into()));
    }

    let estimated_nodes = snapshot.node_count().min(1000);
    let mut distances: HashMap<&str, f64> = HashMap::with_capacity(estimated_nodes);
    // node -> (previous node, edge index)
    let mut predecessors: HashMap<&str, (&str, usize)> = HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    heap.push(State {
        cost: 0.0,
        node: origin,
    });
    distances.insert(origin, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        // Stale entry, a cheaper one for this node was already settled
        if distances.get(node).is_some_and(|&best| cost > best) {
            continue;
        }

        if node == destination {
            break;
        }

        for arc in snapshot.arcs(node).unwrap_or_default() {
            let next = arc.target.as_str();
            let next_cost = cost + arc.weight;

            if distances.get(next).is_none_or(|&best| next_cost < best) {
                distances.insert(next, next_cost);
                predecessors.insert(next, (node, arc.edge));
                heap.push(State {
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }

    if origin != destination && !predecessors.contains_key(destination) {
        return Err(Error::NoPathExists {
            origin: origin.into(),
            destination: destination.into(),
        });
    }

    // Follow predecessors backward from destination to origin
    let mut path = vec![destination];
    let mut edge_refs = Vec::new();
    let mut current = destination;
    while current != origin {
        let Some(&(prev, edge)) = predecessors.get(current) else {
            break;
        };
        edge_refs.push(edge);
        path.push(prev);
        current = prev;
    }
    path.reverse();
    edge_refs.reverse();

    let total_cost = distances.get(destination).copied().unwrap_or_default();

    let coordinates = path
        .iter()
        .map(|&id| {
            snapshot
                .coordinate(id)
                .map(|point| [point.x(), point.y()])
                .ok_or_else(|| Error::NodeNotFound(id.into()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let edges = edge_refs
        .into_iter()
        .filter_map(|idx| snapshot.edge(idx).map(|edge| edge.id.clone()))
        .collect();

    info!(
        "Route {origin}->{destination} [{}, ada={}]: cost={total_cost:.2}, hops={}, hazards_bypassed={}",
        snapshot.mode(),
        snapshot.ada_required(),
        path.len(),
        snapshot.excluded_count(),
    );

    Ok(PathResult {
        path: path.into_iter().map(str::to_owned).collect(),
        coordinates,
        edges,
        total_cost: round_cost(total_cost),
        mode: snapshot.mode(),
        ada_required: snapshot.ada_required(),
        hazards_bypassed: snapshot.excluded_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Edge, Node, RoutingMode, store::InMemoryStore};

    fn diamond() -> InMemoryStore {
        InMemoryStore::from_parts(
            vec![
                Node::new("A", -91.7713, 37.9554),
                Node::new("B", -91.7743, 37.9554),
                Node::new("C", -91.7713, 37.9530),
                Node::new("D", -91.7743, 37.9530),
            ],
            vec![
                Edge::new("ab", "A", "B", 280.0).with_danger(5.0),
                Edge::new("ac", "A", "C", 270.0).with_danger(10.0),
                Edge::new("bd", "B", "D", 270.0).with_danger(15.0),
                Edge::new("cd", "C", "D", 280.0).with_danger(8.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn origin_equal_to_destination_is_trivial() {
        let snapshot = GraphSnapshot::build(&diamond(), RoutingMode::Safest, false).unwrap();
        let result = dijkstra_path(&snapshot, "B", "B").unwrap();
        assert_eq!(result.path, ["B"]);
        assert_eq!(result.coordinates, [[-91.7743, 37.9554]]);
        assert!(result.edges.is_empty());
        assert_eq!(result.total_cost, 0.0);
    }

    #[test]
    fn safest_prefers_lower_cumulative_danger() {
        let snapshot = GraphSnapshot::build(&diamond(), RoutingMode::Safest, false).unwrap();
        let result = dijkstra_path(&snapshot, "A", "D").unwrap();
        assert_eq!(result.path, ["A", "C", "D"]);
        assert_eq!(result.edges, ["ac", "cd"]);
        assert_eq!(result.total_cost, 18.0);
        assert_eq!(result.mode, RoutingMode::Safest);
    }

    #[test]
    fn equal_cost_keeps_first_discovered_path() {
        let snapshot = GraphSnapshot::build(&diamond(), RoutingMode::Shortest, false).unwrap();
        let result = dijkstra_path(&snapshot, "A", "D").unwrap();
        assert_eq!(result.total_cost, 550.0);
        // C is settled before B and reaches D first; B's equal offer loses
        assert_eq!(result.path, ["A", "C", "D"]);
    }

    #[test]
    fn travels_one_way_edges_forward_only() {
        let store = InMemoryStore::from_parts(
            vec![Node::new("x", 0.0, 0.0), Node::new("y", 1.0, 0.0)],
            vec![Edge::new("xy", "x", "y", 10.0).one_way()],
        )
        .unwrap();
        let snapshot = GraphSnapshot::build(&store, RoutingMode::Shortest, false).unwrap();

        assert_eq!(dijkstra_path(&snapshot, "x", "y").unwrap().total_cost, 10.0);
        assert!(matches!(
            dijkstra_path(&snapshot, "y", "x"),
            Err(Error::NoPathExists { .. })
        ));
    }

    #[test]
    fn missing_endpoints_are_not_found() {
        let snapshot = GraphSnapshot::build(&diamond(), RoutingMode::Safest, false).unwrap();
        assert!(matches!(
            dijkstra_path(&snapshot, "Q", "D"),
            Err(Error::NodeNotFound(id)) if id == "Q"
        ));
        assert!(matches!(
            dijkstra_path(&snapshot, "A", "Q"),
            Err(Error::NodeNotFound(id)) if id == "Q"
        ));
    }

    #[test]
    fn rounds_only_the_reported_total() {
        let store = InMemoryStore::from_parts(
            vec![
                Node::new("p", 0.0, 0.0),
                Node::new("q", 0.0, 0.0),
                Node::new("r", 0.0, 0.0),
            ],
            vec![
                Edge::new("pq", "p", "q", 0.1),
                Edge::new("qr", "q", "r", 0.2),
            ],
        )
        .unwrap();
        let snapshot = GraphSnapshot::build(&store, RoutingMode::Shortest, false).unwrap();
        // 0.1 + 0.2 accumulates to 0.30000000000000004
        assert_eq!(dijkstra_path(&snapshot, "p", "r").unwrap().total_cost, 0.3);
    }
}
