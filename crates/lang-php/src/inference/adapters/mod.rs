//! In-memory implementations of the oracle traits.

mod heuristic;
mod hierarchy;
mod noop;

pub use heuristic::HeuristicTypeOracle;
pub use hierarchy::ClassHierarchy;
pub use noop::NoOpOracle;
