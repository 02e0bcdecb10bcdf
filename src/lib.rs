pub mod config;
pub mod error;
pub mod explored;
pub mod frontier;
pub mod heuristic;
pub mod maze;
pub mod path;
pub mod search;
