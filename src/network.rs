pub mod topology;

pub use topology::{AdjacencyGraph, Link, Matrix, Topology};
