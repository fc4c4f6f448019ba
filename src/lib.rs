pub mod algorithms;
pub mod config;
pub mod error;
pub mod network;
pub mod protocol;
pub mod routing_table;

pub use config::TopologyCatalog;
pub use error::TopologyError;
pub use network::{AdjacencyGraph, Link, Matrix, Topology};
pub use protocol::{Convergence, Discrepancy, EngineReport, RoutingEngine, UpdatePolicy};
pub use routing_table::{RouteEntry, RoutingTable, RoutingTables};

/// Routers are numbered 0..N-1 by their row in the topology matrix.
pub type RouterId = usize;

/// Link and path cost. Path sums saturate instead of overflowing.
pub type Cost = u64;
