//! The contract between the engine and the search space it explores.
//!
//! The engine knows nothing about maps, grids or graphs. Everything it learns
//! about the space comes from a [`Provider`]: what it costs to enter an index,
//! how far an index seems to be from the goal, and which indices are next to
//! a node.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use smallvec::SmallVec;

use crate::cost::Cost;
use crate::node::Node;

/// Identity of a position in the search space.
pub trait Index: Clone + Debug + PartialEq + Eq + Hash {}
impl<T> Index for T where T: Clone + Debug + PartialEq + Eq + Hash {}

/// Neighbour buffer that fits common grid fan-outs inline.
pub type NeighbourBuf<I> = SmallVec<[I; 8]>;

/// The neighbours of a node, as handed over by a [`Provider`].
#[derive(Debug)]
pub enum Neighbours<I>
where
    I: Index,
{
    /// A collection only the engine sees.
    Owned(NeighbourBuf<I>),
    /// A collection the provider keeps mutating elsewhere.
    ///
    /// The engine holds the lock only while reading the indices out.
    Shared(Arc<Mutex<Vec<I>>>),
}

impl<I> Neighbours<I>
where
    I: Index,
{
    pub fn none() -> Self {
        Self::Owned(SmallVec::new())
    }

    /// Takes a consistent snapshot of the indices.
    ///
    /// A poisoned lock is still read: the engine never writes through it.
    pub(crate) fn snapshot(self) -> NeighbourBuf<I> {
        match self {
            Neighbours::Owned(buf) => buf,
            Neighbours::Shared(shared) => {
                let guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
                guard.iter().cloned().collect()
            }
        }
    }
}

impl<I> From<Vec<I>> for Neighbours<I>
where
    I: Index,
{
    fn from(v: Vec<I>) -> Self {
        Self::Owned(SmallVec::from_vec(v))
    }
}

impl<I> From<NeighbourBuf<I>> for Neighbours<I>
where
    I: Index,
{
    fn from(buf: NeighbourBuf<I>) -> Self {
        Self::Owned(buf)
    }
}

impl<I> From<Arc<Mutex<Vec<I>>>> for Neighbours<I>
where
    I: Index,
{
    fn from(shared: Arc<Mutex<Vec<I>>>) -> Self {
        Self::Shared(shared)
    }
}

impl<I> FromIterator<I> for Neighbours<I>
where
    I: Index,
{
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self::Owned(iter.into_iter().collect())
    }
}

/// Describes a search space to the engine.
///
/// ```
/// use waysearch::provider::{Neighbours, Provider};
/// use waysearch::node::Node;
///
/// /// Integers on a line, one step apart.
/// struct Line;
///
/// impl Provider<i32, u32> for Line {
///     fn edge_cost(&self, from: Option<&i32>, _to: &i32) -> u32 {
///         if from.is_some() { 1 } else { 0 }
///     }
///     fn heuristic(&self, index: &i32, goal: &i32) -> u32 {
///         index.abs_diff(*goal)
///     }
///     fn find_neighbours(&self, node: &Node<i32, u32>) -> Neighbours<i32> {
///         let i = *node.index();
///         vec![i - 1, i + 1].into()
///     }
/// }
/// ```
pub trait Provider<I, C>
where
    I: Index,
    C: Cost,
{
    /// Real cost of moving from `from` into `to`.
    ///
    /// `from` is `None` for the start index, where the cost is the cost of
    /// occupying it. Returns `C::infeasible()` when `to` can't be entered.
    fn edge_cost(&self, from: Option<&I>, to: &I) -> C;

    /// Estimated cost from `index` to `goal`.
    ///
    /// Paths are only guaranteed optimal when this never overestimates.
    fn heuristic(&self, index: &I, goal: &I) -> C;

    /// Indices reachable in one step from `node`.
    ///
    /// `node` itself must not be listed. Its parent may be; the engine skips
    /// it.
    fn find_neighbours(&self, node: &Node<I, C>) -> Neighbours<I>;
}

impl<P, I, C> Provider<I, C> for &P
where
    P: Provider<I, C> + ?Sized,
    I: Index,
    C: Cost,
{
    #[inline(always)]
    fn edge_cost(&self, from: Option<&I>, to: &I) -> C {
        (**self).edge_cost(from, to)
    }
    #[inline(always)]
    fn heuristic(&self, index: &I, goal: &I) -> C {
        (**self).heuristic(index, goal)
    }
    #[inline(always)]
    fn find_neighbours(&self, node: &Node<I, C>) -> Neighbours<I> {
        (**self).find_neighbours(node)
    }
}

impl<P, I, C> Provider<I, C> for Arc<P>
where
    P: Provider<I, C> + ?Sized,
    I: Index,
    C: Cost,
{
    #[inline(always)]
    fn edge_cost(&self, from: Option<&I>, to: &I) -> C {
        (**self).edge_cost(from, to)
    }
    #[inline(always)]
    fn heuristic(&self, index: &I, goal: &I) -> C {
        (**self).heuristic(index, goal)
    }
    #[inline(always)]
    fn find_neighbours(&self, node: &Node<I, C>) -> Neighbours<I> {
        (**self).find_neighbours(node)
    }
}

impl<P, I, C> Provider<I, C> for Box<P>
where
    P: Provider<I, C> + ?Sized,
    I: Index,
    C: Cost,
{
    #[inline(always)]
    fn edge_cost(&self, from: Option<&I>, to: &I) -> C {
        (**self).edge_cost(from, to)
    }
    #[inline(always)]
    fn heuristic(&self, index: &I, goal: &I) -> C {
        (**self).heuristic(index, goal)
    }
    #[inline(always)]
    fn find_neighbours(&self, node: &Node<I, C>) -> Neighbours<I> {
        (**self).find_neighbours(node)
    }
}
