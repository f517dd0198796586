use rustc_hash::FxHashSet;

use crate::cost::Cost;
use crate::error::SearchError;
use crate::provider::Index;
use crate::provider::Provider;

/// What a search is trying to reach.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Goal<I>
where
    I: Index,
{
    /// A single index.
    Index(I),
    /// Any index of a non-empty set (a goal surface).
    ///
    /// The heuristic of an index is its best heuristic to any member.
    Surface(FxHashSet<I>),
    /// Heads for `target`, but also accepts any index of `surface` reached on
    /// the way.
    Around { target: I, surface: FxHashSet<I> },
}

impl<I> Goal<I>
where
    I: Index,
{
    pub fn index(i: I) -> Self {
        Self::Index(i)
    }

    /// A goal surface. Fails on an empty set, which no path could reach.
    pub fn surface<T: IntoIterator<Item = I>>(indices: T) -> Result<Self, SearchError> {
        let surface: FxHashSet<I> = indices.into_iter().collect();
        if surface.is_empty() {
            return Err(SearchError::EmptyGoalSurface);
        }
        Ok(Self::Surface(surface))
    }

    pub fn around<T: IntoIterator<Item = I>>(target: I, surface: T) -> Self {
        Self::Around {
            target,
            surface: surface.into_iter().collect(),
        }
    }

    #[inline(always)]
    pub fn is_satisfied_by(&self, i: &I) -> bool {
        match self {
            Goal::Index(goal) => goal == i,
            Goal::Surface(surface) => surface.contains(i),
            Goal::Around { target, surface } => target == i || surface.contains(i),
        }
    }

    /// Heuristic from `i` to this goal.
    pub(crate) fn h<P, C>(&self, provider: &P, i: &I) -> C
    where
        P: Provider<I, C>,
        C: Cost,
    {
        match self {
            Goal::Index(goal) => provider.heuristic(i, goal),
            Goal::Surface(surface) => surface
                .iter()
                .map(|goal| provider.heuristic(i, goal))
                .min()
                .unwrap_or_else(C::infeasible),
            Goal::Around { target, .. } => provider.heuristic(i, target),
        }
    }

    /// Every index accepted by this goal.
    pub fn indices(&self) -> Box<dyn Iterator<Item = &I> + '_> {
        match self {
            Goal::Index(goal) => Box::new(std::iter::once(goal)),
            Goal::Surface(surface) => Box::new(surface.iter()),
            Goal::Around { target, surface } => {
                Box::new(std::iter::once(target).chain(surface.iter()))
            }
        }
    }
}

impl<I> From<I> for Goal<I>
where
    I: Index,
{
    fn from(i: I) -> Self {
        Self::Index(i)
    }
}
