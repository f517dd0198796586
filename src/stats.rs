use derive_more::Display;

/// Counters for the last `AStar::compute` call.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq)]
#[display(
    "expanded={expanded} skipped={skipped} generated={generated} infeasible={infeasible} goal_hits={goal_hits}"
)]
pub struct SearchStats {
    /// Nodes that were closed and had their neighbours queued.
    pub expanded: usize,
    /// Nodes pulled from the open set but not expanded, as their index
    /// already had a node at least as good or they were above the cost
    /// ceiling.
    pub skipped: usize,
    /// Nodes queued into the open set.
    pub generated: usize,
    /// Neighbours dropped because their real cost was infeasible.
    pub infeasible: usize,
    /// Goal nodes recorded as results.
    pub goal_hits: usize,
}
