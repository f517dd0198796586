// Costs
// -----
pub mod cost;
pub mod float_cost;

// Internals
// ---------
pub mod derank;
pub(crate) mod open_set;
pub(crate) mod search;

// Search space
// ------------
pub mod goal;
pub mod node;
pub mod provider;

pub(crate) mod builder;

// Search
// ------
pub mod config;
pub mod error;
pub mod stats;

// Algorithms
// ----------
pub mod algorithms;

#[cfg(test)]
mod testing;

pub use algorithms::astar::AStar;
pub use algorithms::astar::SearchState;
pub use config::SearchConfig;
pub use cost::Cost;
pub use error::SearchError;
pub use float_cost::FloatCost;
pub use goal::Goal;
pub use node::Node;
pub use node::NodeHandle;
pub use provider::Neighbours;
pub use provider::Provider;
pub use stats::SearchStats;
