use std::cmp::min;
use std::fmt::Debug;

use crate::cost::Cost;
use crate::derank::derank;
use crate::node::NodeHandle;

// A d-ary heap stored in a flat array.
//
// Every subtree's root ranks better than everything below it. With arity `A`
// the node at `i` has children `A*i + 1 ..= A*(i + 1)`, and its parent at
// `(i - 1) / A`.
//
// ```text
// A = 2:                   0
//              1                         2
//       3            4            5             6
//   7      8      9     10    11     12     13     14
// ```
//
// Siblings are contiguous, so picking the best child is an arg-min over a
// short slice (`derank`).
const HEAP_ARITY: usize = 8usize;

#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    debug_assert!(i != 0, "The root has no parent");
    (i - 1) / HEAP_ARITY
}
#[inline(always)]
#[must_use]
fn down_left(i: usize) -> usize {
    (HEAP_ARITY * i) + 1
}

/// The ranking tuple of the open set.
///
/// Lower total cost wins; among equal total costs the node that was queued
/// first wins.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct OpenRank<C: Cost> {
    pub f: C,
    pub seq: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct OpenEntry<C: Cost> {
    /// The rank of this node that defines how good it is.
    pub rank: OpenRank<C>,
    /// The node in the `SearchTree`.
    pub node: NodeHandle,
}

/// Frontier of nodes built but not yet pulled, best `f` first.
///
/// The same index may be queued several times through different parents;
/// the closed set sorts that out once they are pulled.
#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub(crate) struct OpenSet<C>
where
    C: Cost,
{
    heap: Vec<OpenEntry<C>>,
    /// Insertion counter used to break ties.
    next_seq: u64,
}

impl<C> OpenSet<C>
where
    C: Cost,
{
    pub(crate) fn with_capacity(s: usize) -> Self {
        Self {
            heap: Vec::with_capacity(s),
            next_seq: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }

    pub(crate) fn push(&mut self, node: NodeHandle, f: C) {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Push");

        let rank = OpenRank {
            f,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        let i = self.heap.len();
        self.heap.push(OpenEntry { rank, node });
        self.sift_up(i);

        self.verify_heap();
    }

    pub(crate) fn pop(&mut self) -> Option<NodeHandle> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Pop");

        self.verify_heap();
        if self.heap.len() <= 1 {
            return self.heap.pop().map(|e| e.node);
        }

        // Move the last leaf to the root and let it sink.
        let best = self.heap.swap_remove(0);
        self.sift_down(0);

        self.verify_heap();
        Some(best.node)
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_heap(&self) {
        // All good... (hopefully)
    }

    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_heap(&self) {
        for i in 1..self.heap.len() {
            let p = up(i);
            assert!(
                self.heap[p] <= self.heap[i],
                "Entry[{p}]={:?} !<= child [{i}]={:?}. Out of heap of len={}",
                self.heap[p],
                self.heap[i],
                self.heap.len(),
            );
        }
    }

    /// Raises an entry. Returns its new position.
    fn sift_up(&mut self, mut pos: usize) -> usize {
        debug_assert!(pos < self.heap.len());
        while pos != 0 {
            let parent = up(pos);
            if self.heap[parent] <= self.heap[pos] {
                break;
            }
            self.heap.swap(parent, pos);
            pos = parent;
        }
        pos
    }

    /// Lowers an entry. Returns its new position.
    fn sift_down(&mut self, mut pos: usize) -> usize {
        let len = self.heap.len();
        debug_assert!(pos < len);
        loop {
            let first = down_left(pos);
            if first >= len {
                break;
            }
            let child = first + derank(&self.heap[first..min(first + HEAP_ARITY, len)]);
            if self.heap[pos] <= self.heap[child] {
                break;
            }
            self.heap.swap(pos, child);
            pos = child;
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_cost::FloatCost;
    use nonmax::NonMaxUsize;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn handle(i: usize) -> NodeHandle {
        let Some(i) = NonMaxUsize::new(i) else {
            panic!("test handles are small");
        };
        NodeHandle::new(i)
    }

    #[test]
    fn heap_works() {
        let mut open = OpenSet::<u32>::with_capacity(4);
        assert_eq!(open.pop(), None);
        open.push(handle(7), 3);
        assert_eq!(open.len(), 1);
        assert_eq!(open.pop(), Some(handle(7)));
        assert!(open.is_empty());
    }

    #[test]
    fn heap_sorts() {
        let mut open = OpenSet::<u32>::with_capacity(0);
        for (h, f) in [(0, 5), (1, 3), (2, 9), (3, 1), (4, 4), (5, 2)] {
            open.push(handle(h), f);
        }
        let popped: Vec<usize> = std::iter::from_fn(|| open.pop()).map(|h| h.get()).collect();
        assert_eq!(popped, vec![3, 5, 1, 4, 0, 2]);
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut open = OpenSet::<u32>::with_capacity(0);
        for h in 0..20 {
            open.push(handle(h), 4);
        }
        open.push(handle(99), 2);
        assert_eq!(open.pop(), Some(handle(99)));
        let popped: Vec<usize> = std::iter::from_fn(|| open.pop()).map(|h| h.get()).collect();
        assert_eq!(popped, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn fractional_costs_order() {
        let mut open = OpenSet::<FloatCost<f64>>::with_capacity(0);
        open.push(handle(0), FloatCost::new(0.9));
        open.push(handle(1), FloatCost::new(0.1));
        open.push(handle(2), FloatCost::new(0.5));
        let popped: Vec<usize> = std::iter::from_fn(|| open.pop()).map(|h| h.get()).collect();
        assert_eq!(popped, vec![1, 2, 0]);
    }

    #[test]
    fn random_pushes_pop_sorted() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut open = OpenSet::<u32>::with_capacity(0);
        let mut expected = vec![];
        for seq in 0..500usize {
            let f = rng.random_range(0..50u32);
            open.push(handle(seq), f);
            expected.push((f, seq));
        }
        expected.sort();
        let popped: Vec<usize> = std::iter::from_fn(|| open.pop()).map(|h| h.get()).collect();
        let expected: Vec<usize> = expected.into_iter().map(|(_, seq)| seq).collect();
        assert_eq!(popped, expected);
    }

    #[test]
    fn clear_resets_ties() {
        let mut open = OpenSet::<u32>::with_capacity(0);
        open.push(handle(0), 1);
        open.clear();
        assert!(open.is_empty());
        open.push(handle(1), 1);
        open.push(handle(2), 1);
        assert_eq!(open.pop(), Some(handle(1)));
    }
}
