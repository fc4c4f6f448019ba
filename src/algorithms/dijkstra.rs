use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::network::Topology;
use crate::{Cost, RouterId};

#[derive(Debug, PartialEq, Eq)]
struct State {
    cost: Cost,
    router: RouterId,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the cheapest router first
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.router.cmp(&self.router))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest path cost from `source` to every router, indexed by destination.
/// `None` marks an unreachable destination.
pub fn shortest_costs(topology: &Topology, source: RouterId) -> Vec<Option<Cost>> {
    let size = topology.router_count();
    let mut distances: Vec<Option<Cost>> = vec![None; size];
    if source >= size {
        return distances;
    }

    let mut heap = BinaryHeap::new();
    distances[source] = Some(0);
    heap.push(State { cost: 0, router: source });

    while let Some(State { cost, router }) = heap.pop() {
        // Stale heap entry
        if distances[router].is_some_and(|best| cost > best) {
            continue;
        }

        for (neighbor, link_cost) in topology.neighbors(router) {
            let new_cost = cost.saturating_add(link_cost);
            if distances[neighbor].is_none_or(|best| new_cost < best) {
                distances[neighbor] = Some(new_cost);
                heap.push(State {
                    cost: new_cost,
                    router: neighbor,
                });
            }
        }
    }

    distances
}

/// Shortest path costs between every pair of routers: `result[src][dst]`.
pub fn all_pairs_costs(topology: &Topology) -> Vec<Vec<Option<Cost>>> {
    topology
        .routers()
        .map(|source| shortest_costs(topology, source))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Topology {
        Topology::from_matrix(&[vec![0, 1, 4], vec![1, 0, 2], vec![4, 2, 0]]).unwrap()
    }

    #[test]
    fn finds_cheaper_indirect_path() {
        assert_eq!(shortest_costs(&triangle(), 0), vec![Some(0), Some(1), Some(3)]);
    }

    #[test]
    fn unreachable_routers_are_none() {
        let topology = Topology::from_matrix(&[vec![0, 0], vec![0, 0]]).unwrap();
        assert_eq!(all_pairs_costs(&topology), vec![vec![Some(0), None], vec![None, Some(0)]]);
    }

    #[test]
    fn follows_link_direction() {
        let topology = Topology::from_matrix(&[vec![0, 2], vec![0, 0]]).unwrap();
        let costs = all_pairs_costs(&topology);
        assert_eq!(costs[0][1], Some(2));
        assert_eq!(costs[1][0], None);
    }

    #[test]
    fn out_of_range_source_reaches_nothing() {
        assert!(shortest_costs(&triangle(), 9).iter().all(Option::is_none));
    }
}
