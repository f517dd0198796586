use std::fmt::Debug;

use derive_more::Display;
use nonmax::NonMaxUsize;

use crate::cost::Cost;
use crate::provider::Index;

/// A stable reference to a `Node` in the `SearchTree`.
///
/// `NonMaxUsize` leaves a niche so `Option<NodeHandle>` is still a single
/// word.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("#{}", _0.get())]
pub struct NodeHandle(NonMaxUsize);

impl NodeHandle {
    #[inline(always)]
    pub(crate) fn new(i: NonMaxUsize) -> Self {
        Self(i)
    }

    #[inline(always)]
    pub fn get(&self) -> usize {
        self.0.get()
    }
}

/// A vertex of the search tree.
///
/// Nodes are never modified after being built. Better routes to the same
/// index produce new nodes instead.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct Node<I, C>
where
    I: Index,
    C: Cost,
{
    pub(crate) parent: Option<(NodeHandle, I)>,
    pub(crate) index: I,
    pub(crate) g: C,
    pub(crate) h: C,
    pub(crate) f: C,
}

impl<I, C> Node<I, C>
where
    I: Index,
    C: Cost,
{
    pub fn new(index: I, parent: Option<(NodeHandle, I)>, g: C, h: C) -> Self {
        Self {
            parent,
            index,
            g,
            h,
            f: g.saturating_add(&h),
        }
    }

    #[inline(always)]
    pub fn index(&self) -> &I {
        &self.index
    }

    /// Real cost from the start, `g`.
    #[inline(always)]
    pub fn real_cost(&self) -> C {
        self.g
    }

    /// Estimated remaining cost, `h`.
    #[inline(always)]
    pub fn heuristic(&self) -> C {
        self.h
    }

    /// `g + h`, the priority used by the open set.
    #[inline(always)]
    pub fn total_cost(&self) -> C {
        self.f
    }

    #[inline(always)]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent.as_ref().map(|(h, _)| *h)
    }

    #[inline(always)]
    pub fn parent_index(&self) -> Option<&I> {
        self.parent.as_ref().map(|(_, i)| i)
    }

    #[inline(always)]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl<I, C> std::fmt::Display for Node<I, C>
where
    I: Index,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node({:?}, g={}, h={}, f={})",
            self.index, self.g, self.h, self.f
        )
    }
}
