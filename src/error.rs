use thiserror::Error;

/// Ways a search can be misconfigured.
///
/// Running out of options is not an error: `AStar::compute` returns `false`
/// and the fallback rankings take over from there.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Goal surface is empty, no index could satisfy it")]
    EmptyGoalSurface,
    #[error("At least one path must be requested")]
    NoPathsRequested,
    #[error("The expansion budget must allow at least one expansion")]
    EmptyExpansionBudget,
}
