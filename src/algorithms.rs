pub mod dijkstra;

pub use dijkstra::{all_pairs_costs, shortest_costs};
