use std::fmt::Debug;

use nonmax::NonMaxUsize;

use crate::cost::Cost;
use crate::node::Node;
use crate::node::NodeHandle;
use crate::provider::Index;

/// All the Search Nodes of a search. Naturally forms a Search Tree as each
/// node may point to a parent Node.
///
/// It only grows during a search and is cleared as a whole when a new search
/// starts, so handles stay valid until then.
#[cfg_attr(feature = "inspect", derive(Clone))]
pub(crate) struct SearchTree<I, C>
where
    I: Index,
    C: Cost,
{
    nodes: Vec<Node<I, C>>,
}

impl<I, C> SearchTree<I, C>
where
    I: Index,
    C: Cost,
{
    #[inline(always)]
    #[must_use]
    pub(crate) fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    #[inline(always)]
    pub(crate) fn push(&mut self, node: Node<I, C>) -> NodeHandle {
        debug_assert!(
            node.parent().is_none_or(|p| p.get() < self.nodes.len()),
            "Parents must be pushed before their children"
        );
        let i = self.nodes.len();
        self.nodes.push(node);
        // SAFETY: A Vec of non-zero-sized nodes can't hold `usize::MAX`
        // elements, so `i` is never the max value.
        NodeHandle::new(unsafe { NonMaxUsize::new_unchecked(i) })
    }

    #[inline(always)]
    pub(crate) fn get(&self, handle: NodeHandle) -> Option<&Node<I, C>> {
        self.nodes.get(handle.get())
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    #[inline(always)]
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Walks up from `handle` to its root.
    pub(crate) fn ancestry(&self, handle: NodeHandle) -> Ancestry<'_, I, C> {
        Ancestry {
            tree: self,
            next: Some(handle),
        }
    }

    /// Indices from the root down to `handle`.
    #[must_use]
    pub(crate) fn path(&self, handle: NodeHandle) -> Vec<I> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("PathReconstruction");

        let mut path: Vec<I> = self
            .ancestry(handle)
            .map(|node| node.index().clone())
            .collect();
        path.reverse();
        path
    }
}

impl<I, C> Default for SearchTree<I, C>
where
    I: Index,
    C: Cost,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<I, C> std::ops::Index<NodeHandle> for SearchTree<I, C>
where
    I: Index,
    C: Cost,
{
    type Output = Node<I, C>;

    #[inline(always)]
    fn index(&self, handle: NodeHandle) -> &Self::Output {
        &self.nodes[handle.get()]
    }
}

impl<I, C> Debug for SearchTree<I, C>
where
    I: Index,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}

/// Iterator over a node and its ancestors, ending at the root.
pub(crate) struct Ancestry<'t, I, C>
where
    I: Index,
    C: Cost,
{
    tree: &'t SearchTree<I, C>,
    next: Option<NodeHandle>,
}

impl<'t, I, C> Iterator for Ancestry<'t, I, C>
where
    I: Index,
    C: Cost,
{
    type Item = &'t Node<I, C>;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.next?;
        let node = self.tree.get(handle)?;
        debug_assert!(node.parent() != Some(handle));
        self.next = node.parent();
        Some(node)
    }
}
