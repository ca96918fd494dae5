use std::collections::BinaryHeap;

use hashbrown::HashMap;

use super::state::State;
use crate::{Error, NodeId, routing::GraphSnapshot};

/// One-to-many Dijkstra over a snapshot.
/// Returns the settled cost of every node reachable from `origin`,
/// optionally bounded by `max_cost`.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`] if `origin` is not in the snapshot
pub fn dijkstra_path_weights(
    snapshot: &GraphSnapshot,
    origin: &str,
    max_cost: Option<f64>,
) -> Result<HashMap<NodeId, f64>, Error> {
    if !snapshot.contains_node(origin) {
        return Err(Error::NodeNotFound(origin.into()));
    }

    let mut distances: HashMap<&str, f64> = HashMap::new();
    let mut heap = BinaryHeap::new();

    heap.push(State {
        cost: 0.0,
        node: origin,
    });
    distances.insert(origin, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        // Skip if we've found a better path
        if let Some(&best) = distances.get(node) {
            if cost > best {
                continue;
            }
        }

        for arc in snapshot.arcs(node).unwrap_or_default() {
            let next_cost = cost + arc.weight;
            if max_cost.is_some_and(|max| next_cost > max) {
                continue;
            }

            match distances.entry(arc.target.as_str()) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: &arc.target,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: &arc.target,
                        });
                    }
                }
            }
        }
    }

    Ok(distances
        .into_iter()
        .map(|(node, cost)| (node.to_owned(), cost))
        .collect())
}
