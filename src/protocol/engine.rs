use std::fmt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::algorithms::all_pairs_costs;
use crate::error::Result;
use crate::network::{Link, Topology};
use crate::routing_table::{RouteEntry, RoutingTable, RoutingTables};
use crate::{Cost, RouterId};

/// Which tables a router reads from its neighbors during a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdatePolicy {
    /// Neighbor tables are read as they are when visited, so routers later in
    /// the round already see updates made earlier in the same round.
    #[default]
    InPlace,
    /// Every router reads the tables as they were when the round started.
    Snapshot,
}

/// Outcome of [`RoutingEngine::converge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Convergence {
    /// Rounds run, including the final round that changed nothing.
    pub rounds: usize,
    pub converged: bool,
}

/// A table entry that disagrees with the true shortest path cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Discrepancy {
    pub router: RouterId,
    pub destination: RouterId,
    pub table_cost: Option<Cost>,
    pub shortest_cost: Option<Cost>,
}

/// Serializable view of an engine: the links to draw and the tables to show.
#[derive(Debug, Clone, Serialize)]
pub struct EngineReport<'a> {
    pub policy: UpdatePolicy,
    pub rounds: usize,
    pub links: Vec<Link>,
    pub tables: &'a RoutingTables,
}

/// Synchronous distance-vector simulation over a fixed topology.
///
/// The graph never changes after construction. Tables only grow or improve:
/// an entry is added when a destination is first learned and replaced only by
/// a strictly cheaper route, so on equal cost the first next hop found wins.
/// Loading a different topology means building a new engine.
#[derive(Debug, Clone)]
pub struct RoutingEngine {
    topology: Topology,
    tables: RoutingTables,
    policy: UpdatePolicy,
    rounds: usize,
}

impl RoutingEngine {
    /// Validates `matrix`, builds the neighbor graph and seeds one-hop tables.
    pub fn build(matrix: &[Vec<i64>]) -> Result<Self> {
        Self::with_policy(matrix, UpdatePolicy::default())
    }

    pub fn with_policy(matrix: &[Vec<i64>], policy: UpdatePolicy) -> Result<Self> {
        let topology = Topology::from_matrix(matrix)?;
        Ok(Self::from_topology(topology, policy))
    }

    pub fn from_topology(topology: Topology, policy: UpdatePolicy) -> Self {
        let tables = topology
            .routers()
            .map(|router| {
                let mut table = RoutingTable::new(router);
                for (neighbor, cost) in topology.neighbors(router) {
                    table.insert(neighbor, RouteEntry::via(cost, neighbor));
                }
                table
            })
            .collect();

        info!(
            "Routing engine built: {} routers, {} links, {:?} updates",
            topology.router_count(),
            topology.link_count(),
            policy
        );

        Self {
            topology,
            tables: RoutingTables::from_tables(tables),
            policy,
            rounds: 0,
        }
    }

    /// Runs exactly one exchange round.
    pub fn relax(&mut self) {
        self.relax_round();
    }

    /// Runs exactly one exchange round and returns how many entries were
    /// added or improved. Zero means the tables were already at the fixed point.
    pub fn relax_round(&mut self) -> usize {
        let snapshot = match self.policy {
            UpdatePolicy::InPlace => None,
            UpdatePolicy::Snapshot => Some(self.tables.clone()),
        };
        let mut updates = 0;

        for router in self.topology.routers() {
            for (neighbor, _) in self.topology.neighbors(router) {
                let view = snapshot.as_ref().unwrap_or(&self.tables);
                let Some(to_neighbor) = view.route(router, neighbor).map(|e| e.cost) else {
                    continue;
                };
                let advertised: Vec<(RouterId, Cost)> = view
                    .get(neighbor)
                    .map(|table| {
                        table
                            .iter()
                            .filter(|&(destination, _)| destination != router)
                            .map(|(destination, entry)| (destination, entry.cost))
                            .collect()
                    })
                    .unwrap_or_default();

                let Some(table) = self.tables.get_mut(router) else {
                    continue;
                };
                for (destination, cost) in advertised {
                    let candidate = RouteEntry::via(to_neighbor.saturating_add(cost), neighbor);
                    if table.offer(destination, candidate) {
                        trace!(
                            "Router {} -> {}: cost {} via {}",
                            router, destination, candidate.cost, neighbor
                        );
                        updates += 1;
                    }
                }
            }
        }

        self.rounds += 1;
        debug!("Round {} finished with {} updates", self.rounds, updates);
        updates
    }

    /// Runs rounds until one changes nothing or `max_rounds` have run.
    pub fn converge(&mut self, max_rounds: usize) -> Convergence {
        for round in 1..=max_rounds {
            if self.relax_round() == 0 {
                info!("Tables converged after {} rounds", self.rounds);
                return Convergence {
                    rounds: round,
                    converged: true,
                };
            }
        }
        Convergence {
            rounds: max_rounds,
            converged: false,
        }
    }

    /// Current state of every table. Always reflects the latest round.
    pub fn tables(&self) -> &RoutingTables {
        &self.tables
    }

    pub fn table(&self, router: RouterId) -> Option<&RoutingTable> {
        self.tables.get(router)
    }

    pub fn route(&self, router: RouterId, destination: RouterId) -> Option<&RouteEntry> {
        self.tables.route(router, destination)
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn policy(&self) -> UpdatePolicy {
        self.policy
    }

    /// Rounds run since the engine was built.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn router_count(&self) -> usize {
        self.topology.router_count()
    }

    /// Compares every table against shortest path costs computed directly on
    /// the graph. Empty once the tables have converged.
    pub fn discrepancies(&self) -> Vec<Discrepancy> {
        let shortest = all_pairs_costs(&self.topology);
        let mut found = Vec::new();

        for (router, costs) in shortest.iter().enumerate() {
            for (destination, &shortest_cost) in costs.iter().enumerate() {
                let table_cost = self.route(router, destination).map(|e| e.cost);
                if table_cost != shortest_cost {
                    found.push(Discrepancy {
                        router,
                        destination,
                        table_cost,
                        shortest_cost,
                    });
                }
            }
        }

        found
    }

    pub fn report(&self) -> EngineReport<'_> {
        EngineReport {
            policy: self.policy,
            rounds: self.rounds,
            links: self.topology.links(),
            tables: &self.tables,
        }
    }

    /// Writes every table in `Destination / Cost / Next Hop` form.
    pub fn render(&self, out: &mut impl fmt::Write) -> fmt::Result {
        for (router, table) in self.tables.iter() {
            if router > 0 {
                writeln!(out)?;
            }
            table.render(router, out)?;
        }
        Ok(())
    }
}

/// One line per router.
impl fmt::Display for RoutingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tables)
    }
}
