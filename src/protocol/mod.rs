pub mod engine;

pub use engine::{Convergence, Discrepancy, EngineReport, RoutingEngine, UpdatePolicy};
