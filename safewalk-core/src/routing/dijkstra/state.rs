use std::cmp::Ordering;

/// Heap entry ordered by cumulative cost only; the node is payload.
#[derive(Copy, Clone, Debug)]
pub(super) struct State<'a> {
    pub(super) cost: f64,
    pub(super) node: &'a str,
}

// Implement Ord for State to use in BinaryHeap
impl Ord for State<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap)
        other.cost.total_cmp(&self.cost)
    }
}

impl PartialOrd for State<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State<'_> {}

#[cfg(test)]
mod tests {
    use std::collections::BinaryHeap;

    use super::*;

    #[test]
    fn heap_pops_cheapest_first() {
        let mut heap = BinaryHeap::new();
        heap.push(State { cost: 18.0, node: "d" });
        heap.push(State { cost: 5.0, node: "b" });
        heap.push(State { cost: 10.0, node: "c" });

        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|s| s.node).collect();
        assert_eq!(order, ["b", "c", "d"]);
    }
}
