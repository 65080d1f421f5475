pub mod heuristic;
pub mod search;
