use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};

use crate::{Cost, RouterId};

/// One distance-vector entry: cost to a destination and the neighbor to forward through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub cost: Cost,
    pub next_hop: Option<RouterId>,
}

impl RouteEntry {
    /// The route a router holds to itself.
    pub fn local() -> Self {
        Self {
            cost: 0,
            next_hop: None,
        }
    }

    pub fn via(cost: Cost, next_hop: RouterId) -> Self {
        Self {
            cost,
            next_hop: Some(next_hop),
        }
    }

    pub fn is_local(&self) -> bool {
        self.next_hop.is_none()
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.next_hop {
            Some(hop) => write!(f, "({}, {})", self.cost, hop),
            None => write!(f, "({}, none)", self.cost),
        }
    }
}

/// Distance vector of a single router, keyed by destination.
///
/// A missing destination means "unreachable so far".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutingTable {
    routes: BTreeMap<RouterId, RouteEntry>,
}

impl RoutingTable {
    /// A table holding only the self route of `owner`.
    pub fn new(owner: RouterId) -> Self {
        let mut routes = BTreeMap::new();
        routes.insert(owner, RouteEntry::local());
        Self { routes }
    }

    pub fn get(&self, destination: RouterId) -> Option<&RouteEntry> {
        self.routes.get(&destination)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RouterId, &RouteEntry)> {
        self.routes.iter().map(|(&d, e)| (d, e))
    }

    pub(crate) fn insert(&mut self, destination: RouterId, entry: RouteEntry) {
        self.routes.insert(destination, entry);
    }

    /// Installs `candidate` if the destination is unknown or the candidate is
    /// strictly cheaper. Equal cost keeps the existing next hop.
    pub(crate) fn offer(&mut self, destination: RouterId, candidate: RouteEntry) -> bool {
        match self.routes.get_mut(&destination) {
            Some(current) if candidate.cost < current.cost => {
                *current = candidate;
                true
            }
            Some(_) => false,
            None => {
                self.routes.insert(destination, candidate);
                true
            }
        }
    }

    /// Writes the table as `Destination / Cost / Next Hop` columns.
    pub fn render(&self, owner: RouterId, out: &mut impl fmt::Write) -> fmt::Result {
        writeln!(out, "Router {}", owner)?;
        writeln!(out, "{:<12} {:<12} {:<12}", "Destination", "Cost", "Next Hop")?;
        writeln!(out, "{}", "-".repeat(38))?;
        for (destination, entry) in self.iter() {
            let hop = entry
                .next_hop
                .map_or_else(|| "-".to_string(), |h| h.to_string());
            writeln!(out, "{:<12} {:<12} {:<12}", destination, entry.cost, hop)?;
        }
        Ok(())
    }
}

impl fmt::Display for RoutingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (destination, entry)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", destination, entry)?;
        }
        write!(f, "}}")
    }
}

/// Tables of every router, indexed by router id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutingTables {
    tables: Vec<RoutingTable>,
}

impl RoutingTables {
    pub(crate) fn from_tables(tables: Vec<RoutingTable>) -> Self {
        Self { tables }
    }

    pub fn get(&self, router: RouterId) -> Option<&RoutingTable> {
        self.tables.get(router)
    }

    pub fn route(&self, router: RouterId, destination: RouterId) -> Option<&RouteEntry> {
        self.tables.get(router)?.get(destination)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RouterId, &RoutingTable)> {
        self.tables.iter().enumerate()
    }

    pub(crate) fn get_mut(&mut self, router: RouterId) -> Option<&mut RoutingTable> {
        self.tables.get_mut(router)
    }
}

impl fmt::Display for RoutingTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (router, table) in self.iter() {
            writeln!(f, "Router {}: {}", router, table)?;
        }
        Ok(())
    }
}
