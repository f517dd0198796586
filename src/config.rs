use crate::cost::Cost;
use crate::error::SearchError;

/// Limits of a single `AStar::compute_with` call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig<C>
where
    C: Cost,
{
    max_paths: usize,
    max_cost: C,
    max_expansions: Option<usize>,
}

impl<C> SearchConfig<C>
where
    C: Cost,
{
    /// One path, no cost ceiling and no expansion budget.
    pub fn new() -> Self {
        Self {
            max_paths: 1,
            max_cost: C::max_value(),
            max_expansions: None,
        }
    }

    /// Stop once `max_paths` goal hits were recorded.
    pub fn with_max_paths(mut self, max_paths: usize) -> Result<Self, SearchError> {
        if max_paths == 0 {
            return Err(SearchError::NoPathsRequested);
        }
        self.max_paths = max_paths;
        Ok(self)
    }

    /// Soft ceiling on total cost.
    ///
    /// Nodes above it are never expanded, but they may still be queued and
    /// reported as goal hits.
    pub fn with_max_cost(mut self, max_cost: C) -> Self {
        self.max_cost = max_cost;
        self
    }

    /// Stop after this many expansions, found or not.
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Result<Self, SearchError> {
        if max_expansions == 0 {
            return Err(SearchError::EmptyExpansionBudget);
        }
        self.max_expansions = Some(max_expansions);
        Ok(self)
    }

    #[inline(always)]
    pub fn max_paths(&self) -> usize {
        self.max_paths
    }
    #[inline(always)]
    pub fn max_cost(&self) -> C {
        self.max_cost
    }
    #[inline(always)]
    pub fn max_expansions(&self) -> Option<usize> {
        self.max_expansions
    }
}

impl<C> Default for SearchConfig<C>
where
    C: Cost,
{
    fn default() -> Self {
        Self::new()
    }
}
