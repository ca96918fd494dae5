use log::warn;
use rayon::prelude::*;
use safewalk_core::{prelude::*, routing::round_cost};
use serde_json::{Value, json};

/// Origin x destination route costs over a single snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    pub nodes: Vec<NodeId>,
    pub mode: RoutingMode,
    pub ada_required: bool,
    /// `costs[i][j]` is the cost from `nodes[i]` to `nodes[j]`,
    /// `None` when unreachable or unknown
    pub costs: Vec<Vec<Option<f64>>>,
}

impl CostMatrix {
    pub fn cost(&self, origin: usize, destination: usize) -> Option<f64> {
        self.costs.get(origin)?.get(destination).copied().flatten()
    }

    pub fn to_json(&self) -> Value {
        json!({
            "nodes": self.nodes,
            "mode": self.mode,
            "ada_required": self.ada_required,
            "costs": self.costs,
        })
    }
}

/// Computes route costs between every pair of `nodes`.
///
/// The graph is read from the store once; rows are computed in parallel.
/// An origin missing from the graph yields a row of `None`.
///
/// # Errors
///
/// Only store failures while building the snapshot
pub fn cost_matrix<S: GraphStore + ?Sized>(
    store: &S,
    nodes: &[NodeId],
    mode: RoutingMode,
    ada_required: bool,
) -> Result<CostMatrix, Error> {
    let snapshot = GraphSnapshot::build(store, mode, ada_required)?;

    let costs = nodes
        .par_iter()
        .map(|origin| match dijkstra_path_weights(&snapshot, origin, None) {
            Ok(reached) => nodes
                .iter()
                .map(|destination| reached.get(destination).map(|&cost| round_cost(cost)))
                .collect::<Vec<_>>(),
            Err(e) => {
                warn!("Routing failed for origin {origin}, error: {e}");
                vec![None; nodes.len()]
            }
        })
        .collect::<Vec<_>>();

    Ok(CostMatrix {
        nodes: nodes.to_vec(),
        mode,
        ada_required,
        costs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryStore {
        InMemoryStore::from_parts(
            vec![
                Node::new("A", 0.0, 0.0),
                Node::new("B", 0.0, 1.0),
                Node::new("C", 1.0, 0.0),
                Node::new("D", 1.0, 1.0),
            ],
            vec![
                Edge::new("ab", "A", "B", 280.0).with_danger(5.0),
                Edge::new("ac", "A", "C", 270.0).with_danger(10.0),
                Edge::new("bd", "B", "D", 270.0).with_danger(15.0).inaccessible(),
                Edge::new("cd", "C", "D", 280.0).with_danger(8.0),
            ],
        )
        .unwrap()
    }

    fn ids(ids: &[&str]) -> Vec<NodeId> {
        ids.iter().map(|id| (*id).to_string()).collect()
    }

    #[test]
    fn matrix_matches_single_routes() {
        let store = store();
        let nodes = ids(&["A", "B", "C", "D"]);
        let matrix = cost_matrix(&store, &nodes, RoutingMode::Safest, false).unwrap();

        for (i, origin) in nodes.iter().enumerate() {
            for (j, destination) in nodes.iter().enumerate() {
                let request = RouteRequest::new(origin.clone(), destination.clone());
                let single = compute_route(&store, &request).unwrap();
                assert_eq!(matrix.cost(i, j), Some(single.total_cost));
            }
        }
        assert_eq!(matrix.cost(0, 3), Some(18.0));
        assert_eq!(matrix.cost(1, 1), Some(0.0));
    }

    #[test]
    fn unknown_origin_yields_empty_row() {
        let nodes = ids(&["A", "ghost"]);
        let matrix = cost_matrix(&store(), &nodes, RoutingMode::Shortest, false).unwrap();
        assert_eq!(matrix.costs[1], vec![None, None]);
        assert_eq!(matrix.cost(0, 1), None);
        assert_eq!(matrix.cost(0, 0), Some(0.0));
    }

    #[test]
    fn serializes_mode_in_lowercase() {
        let nodes = ids(&["A", "D"]);
        let matrix = cost_matrix(&store(), &nodes, RoutingMode::Shortest, true).unwrap();
        let value = matrix.to_json();
        assert_eq!(value["mode"], "shortest");
        assert_eq!(value["costs"][0][1], 550.0);
    }

    #[test]
    fn fractional_costs_round_like_single_routes() {
        let store = InMemoryStore::from_parts(
            vec![
                Node::new("p", 0.0, 0.0),
                Node::new("q", 0.0, 1.0),
                Node::new("r", 0.0, 2.0),
            ],
            vec![
                Edge::new("pq", "p", "q", 0.1),
                Edge::new("qr", "q", "r", 0.2),
            ],
        )
        .unwrap();
        let nodes = ids(&["p", "r"]);
        let matrix = cost_matrix(&store, &nodes, RoutingMode::Shortest, false).unwrap();
        let single = compute_route(&store, &RouteRequest::new("p", "r").mode(RoutingMode::Shortest))
            .unwrap();

        assert_eq!(matrix.cost(0, 1), Some(0.3));
        assert_eq!(matrix.cost(0, 1), Some(single.total_cost));
        assert_eq!(round_cost(0.1 + 0.2), single.total_cost);
    }
}
