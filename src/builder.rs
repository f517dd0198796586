use std::marker::PhantomData;

use crate::cost::Cost;
use crate::goal::Goal;
use crate::node::Node;
use crate::node::NodeHandle;
use crate::provider::Index;
use crate::provider::Provider;

/// Materializes `Node`s, owning the real-cost accumulation rule.
///
/// - A root costs whatever occupying its index costs.
/// - Staying on the parent's index is free.
/// - Any other move adds the edge cost to the parent's real cost.
///
/// The infeasible sentinel saturates through the sum, so a node behind an
/// impassable edge comes out with an infeasible real cost.
pub(crate) struct NodeBuilder<'a, P, I, C>
where
    P: Provider<I, C>,
    I: Index,
    C: Cost,
{
    provider: &'a P,
    goal: &'a Goal<I>,
    _phantom_cost: PhantomData<C>,
}

impl<'a, P, I, C> NodeBuilder<'a, P, I, C>
where
    P: Provider<I, C>,
    I: Index,
    C: Cost,
{
    pub(crate) fn new(provider: &'a P, goal: &'a Goal<I>) -> Self {
        Self {
            provider,
            goal,
            _phantom_cost: PhantomData,
        }
    }

    pub(crate) fn root(&self, index: I) -> Node<I, C> {
        let g = self.provider.edge_cost(None, &index);
        let h = self.goal.h(self.provider, &index);
        Node::new(index, None, g, h)
    }

    pub(crate) fn child(&self, parent: (NodeHandle, &Node<I, C>), index: I) -> Node<I, C> {
        let (parent_handle, parent) = parent;
        let g = if index == parent.index {
            parent.g
        } else {
            let c = self.provider.edge_cost(Some(&parent.index), &index);
            parent.g.saturating_add(&c)
        };
        let h = self.goal.h(self.provider, &index);
        Node::new(index, Some((parent_handle, parent.index.clone())), g, h)
    }
}
