use std::collections::BTreeMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, TopologyError};
use crate::{Cost, RouterId};

/// Square cost matrix: entry (i, j) is the cost of the link i -> j, 0 means no link.
pub type Matrix = Vec<Vec<i64>>;

/// router -> (neighbor -> link cost)
pub type AdjacencyGraph = Vec<BTreeMap<RouterId, Cost>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Link {
    pub from: RouterId,
    pub to: RouterId,
    pub cost: Cost,
}

/// Immutable router/neighbor graph built from a validated cost matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    graph: AdjacencyGraph,
}

impl Topology {
    /// Validates `matrix` and builds the neighbor graph.
    ///
    /// The whole matrix is checked before anything is built, so a malformed
    /// matrix never yields a partial topology. Diagonal entries are ignored:
    /// a router is never its own neighbor. Symmetry is not enforced.
    pub fn from_matrix(matrix: &[Vec<i64>]) -> Result<Self> {
        let size = matrix.len();

        for (row, costs) in matrix.iter().enumerate() {
            if costs.len() != size {
                return Err(TopologyError::NotSquare {
                    row,
                    len: costs.len(),
                    expected: size,
                });
            }
            for (col, &cost) in costs.iter().enumerate() {
                if cost < 0 {
                    return Err(TopologyError::NegativeCost { row, col, cost });
                }
            }
        }

        let mut graph = Vec::with_capacity(size);
        for (row, costs) in matrix.iter().enumerate() {
            let mut neighbors = BTreeMap::new();
            for (col, &cost) in costs.iter().enumerate() {
                if cost == 0 {
                    continue;
                }
                if row == col {
                    warn!("Ignoring self link on router {} (cost {})", row, cost);
                    continue;
                }
                // Sign checked above.
                neighbors.insert(col, cost as Cost);
            }
            graph.push(neighbors);
        }

        let topology = Self { graph };
        debug!(
            "Topology built: {} routers, {} links",
            topology.router_count(),
            topology.link_count()
        );
        Ok(topology)
    }

    pub fn router_count(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn routers(&self) -> impl Iterator<Item = RouterId> {
        0..self.graph.len()
    }

    /// Directed link count, i.e. the number of non-zero off-diagonal entries.
    pub fn link_count(&self) -> usize {
        self.graph.iter().map(BTreeMap::len).sum()
    }

    /// Neighbors of `router` in ascending id order. Unknown routers have none.
    pub fn neighbors(&self, router: RouterId) -> impl Iterator<Item = (RouterId, Cost)> + '_ {
        self.graph
            .get(router)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().map(|(&n, &cost)| (n, cost)))
    }

    pub fn link_cost(&self, from: RouterId, to: RouterId) -> Option<Cost> {
        self.graph.get(from)?.get(&to).copied()
    }

    /// Every directed link, for drawing the topology (edge label = cost).
    pub fn links(&self) -> Vec<Link> {
        self.graph
            .iter()
            .enumerate()
            .flat_map(|(from, neighbors)| {
                neighbors
                    .iter()
                    .map(move |(&to, &cost)| Link { from, to, cost })
            })
            .collect()
    }

    pub fn is_symmetric(&self) -> bool {
        self.links()
            .iter()
            .all(|link| self.link_cost(link.to, link.from) == Some(link.cost))
    }
}
