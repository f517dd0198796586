use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::marker::PhantomData;

use derive_more::Display;
use rustc_hash::FxHashMap;

use crate::builder::NodeBuilder;
use crate::config::SearchConfig;
use crate::cost::Cost;
use crate::goal::Goal;
use crate::node::Node;
use crate::node::NodeHandle;
use crate::open_set::OpenEntry;
use crate::open_set::OpenSet;
use crate::provider::Index;
use crate::provider::Provider;
use crate::search::SearchTree;
use crate::stats::SearchStats;

/// Where an `AStar` is in its lifecycle.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum SearchState {
    /// Nothing computed since the last reset.
    Idle,
    /// Inside `compute`.
    Searching,
    /// The last `compute` recorded at least one way (or started on a goal).
    Succeeded,
    /// The last `compute` ran out of nodes (or budget) without a way.
    Exhausted,
}

/// A* over whatever space a `Provider` describes.
///
/// A search finds up to `max_paths` ways to a goal. Ways are kept as their
/// terminal nodes and turned into index sequences on demand by `next_way`.
///
/// ```
/// use waysearch::algorithms::astar::AStar;
/// use waysearch::node::Node;
/// use waysearch::provider::{Neighbours, Provider};
///
/// struct Line;
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
///
/// let mut astar = AStar::new(Line);
/// if astar.compute(0, 3) {
///     assert_eq!(astar.next_way(), vec![0, 1, 2, 3]);
/// }
/// assert!(astar.next_way().is_empty());
/// ```
pub struct AStar<P, I, C>
where
    P: Provider<I, C>,
    I: Index,
    C: Cost,
{
    provider: P,

    /// Every node built during the current search. Open, closed and result
    /// entries all point into it.
    search_tree: SearchTree<I, C>,

    /// Nodes built but not yet pulled.
    open: OpenSet<C>,

    /// Best node expanded so far for each index.
    ///
    /// A node pulled for an index that's already here is only expanded if it
    /// strictly improves the total cost, replacing the entry.
    closed: FxHashMap<I, NodeHandle>,

    /// Terminal nodes of the ways not yet drained.
    ways: VecDeque<NodeHandle>,

    /// Limits of the current (or last) search.
    config: SearchConfig<C>,

    state: SearchState,
    stats: SearchStats,

    _phantom_index: PhantomData<I>,
}

impl<P, I, C> AStar<P, I, C>
where
    P: Provider<I, C>,
    I: Index,
    C: Cost,
{
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            search_tree: SearchTree::new(),
            open: OpenSet::with_capacity(256),
            closed: FxHashMap::default(),
            ways: VecDeque::new(),
            config: SearchConfig::default(),
            state: SearchState::Idle,
            stats: SearchStats::default(),
            _phantom_index: PhantomData,
        }
    }

    /// Swaps the provider, returning the previous one.
    ///
    /// Ways already found are kept until the next `compute`.
    pub fn set_provider(&mut self, provider: P) -> P {
        std::mem::replace(&mut self.provider, provider)
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn config(&self) -> &SearchConfig<C> {
        &self.config
    }

    /// Finds one way from `start` to `goal`, without a cost ceiling.
    pub fn compute<G: Into<Goal<I>>>(&mut self, start: I, goal: G) -> bool {
        self.compute_with(start, goal, &SearchConfig::default())
    }

    /// Finds up to `config.max_paths()` ways from `start` to `goal`.
    ///
    /// Returns whether any way was found. When it wasn't, `to_closest` and
    /// `to_shortest` can still rank the partial ways explored.
    ///
    /// Starting on a goal succeeds right away without recording a way.
    pub fn compute_with<G: Into<Goal<I>>>(
        &mut self,
        start: I,
        goal: G,
        config: &SearchConfig<C>,
    ) -> bool {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Compute");

        let goal: Goal<I> = goal.into();
        self.reset(config);
        self.state = SearchState::Searching;

        if goal.is_satisfied_by(&start) {
            log::debug!("Start {start:?} already satisfies the goal");
            self.state = SearchState::Succeeded;
            return true;
        }

        let root = NodeBuilder::new(&self.provider, &goal).root(start);
        let mut current = self.search_tree.push(root);
        let mut remaining_paths = self.config.max_paths();

        while self.expand(&goal, current) {
            if let Some(budget) = self.config.max_expansions()
                && self.stats.expanded >= budget
            {
                log::debug!("Expansion budget of {budget} exhausted");
                break;
            }

            let Some(next) = self.open.pop() else {
                break;
            };
            current = next;

            let node = &self.search_tree[current];
            if goal.is_satisfied_by(node.index()) {
                #[cfg(feature = "coz_profile")]
                coz::progress!("GoalFound");
                log::trace!("Goal hit: {node}");

                self.ways.push_back(current);
                self.stats.goal_hits += 1;
                remaining_paths -= 1;
                if remaining_paths == 0 {
                    break;
                }
            }
        }

        // Goals are not approaches to themselves.
        for i in goal.indices() {
            self.closed.remove(i);
        }

        self.state = if self.ways.is_empty() {
            SearchState::Exhausted
        } else {
            SearchState::Succeeded
        };
        log::debug!(
            "Search finished {}: {} way(s), {}",
            self.state,
            self.ways.len(),
            self.stats
        );

        !self.ways.is_empty()
    }

    fn reset(&mut self, config: &SearchConfig<C>) {
        self.search_tree.clear();
        self.open.clear();
        self.closed.clear();
        self.ways.clear();
        self.config = *config;
        self.stats = SearchStats::default();
        self.state = SearchState::Idle;
    }

    /// Closes `current` and queues its neighbours, if it's worth it.
    ///
    /// Returns whether there's anything left to pull.
    fn expand(&mut self, goal: &Goal<I>, current: NodeHandle) -> bool {
        #[cfg(feature = "coz_profile")]
        coz::scope!("NodeExpansion");

        let builder = NodeBuilder::new(&self.provider, goal);

        let node = &self.search_tree[current];
        let f = node.total_cost();

        let improves = match self.closed.get(node.index()) {
            None => true,
            Some(previous) => f < self.search_tree[*previous].total_cost(),
        };
        // The root is always closed, so a failed search has something to rank.
        if !improves || (!node.is_root() && f > self.config.max_cost()) {
            self.stats.skipped += 1;
            return !self.open.is_empty();
        }

        self.stats.expanded += 1;
        log::trace!("Expanding {node}");
        self.closed.insert(node.index().clone(), current);

        // Shared lists are only locked while copying them out.
        let neighbours = self.provider.find_neighbours(node).snapshot();
        for neighbour in neighbours {
            let node = &self.search_tree[current];
            if node.parent_index() == Some(&neighbour) {
                continue;
            }

            let child = builder.child((current, node), neighbour);
            if !child.real_cost().valid() {
                self.stats.infeasible += 1;
                continue;
            }

            let f = child.total_cost();
            let handle = self.search_tree.push(child);
            self.open.push(handle, f);
            self.stats.generated += 1;
        }

        !self.open.is_empty()
    }

    /// Drains the next way, from its start to its terminal index.
    ///
    /// Returns an empty way once every way was drained.
    pub fn next_way(&mut self) -> Vec<I> {
        match self.ways.pop_front() {
            Some(end) => self.search_tree.path(end),
            None => vec![],
        }
    }

    /// Drains every remaining way, best first.
    pub fn drain_ways(&mut self) -> impl Iterator<Item = Vec<I>> + '_ {
        std::iter::from_fn(move || {
            let way = self.next_way();
            (!way.is_empty()).then_some(way)
        })
    }

    /// The terminal nodes of the ways not yet drained, in draining order.
    pub fn ways_nodes(&self) -> impl ExactSizeIterator<Item = &Node<I, C>> + '_ {
        self.ways.iter().map(|h| &self.search_tree[*h])
    }

    /// Any node built by the last search, e.g. a terminal node's parent.
    pub fn node(&self, handle: NodeHandle) -> Option<&Node<I, C>> {
        self.search_tree.get(handle)
    }

    /// Replaces the ways by every partial way explored, closest to the goal
    /// first.
    ///
    /// Meant for after a failed `compute`. Ties on the heuristic go to the
    /// cheaper total cost. Returns `false` when nothing was explored (or it
    /// was already ranked).
    pub fn to_closest(&mut self) -> bool {
        self.rank_closed("closest", |l, r| {
            l.heuristic()
                .cmp(&r.heuristic())
                .then_with(|| l.total_cost().cmp(&r.total_cost()))
        })
    }

    /// Replaces the ways by every partial way explored, cheapest total cost
    /// first.
    ///
    /// Same as `to_closest`, ranking by total cost and breaking ties on the
    /// heuristic.
    pub fn to_shortest(&mut self) -> bool {
        self.rank_closed("shortest", |l, r| {
            l.total_cost()
                .cmp(&r.total_cost())
                .then_with(|| l.heuristic().cmp(&r.heuristic()))
        })
    }

    /// Moves the closed set into the ways and sorts them.
    ///
    /// Nodes tied by `cmp` keep their creation order.
    fn rank_closed<F>(&mut self, ranking: &str, cmp: F) -> bool
    where
        F: Fn(&Node<I, C>, &Node<I, C>) -> Ordering,
    {
        self.ways.clear();
        if self.closed.is_empty() {
            log::debug!("Nothing explored to rank by {ranking}");
            return false;
        }

        let tree = &self.search_tree;
        let mut ways: Vec<NodeHandle> = self.closed.drain().map(|(_, h)| h).collect();
        ways.sort_by(|l, r| cmp(&tree[*l], &tree[*r]).then_with(|| l.cmp(r)));
        self.ways = ways.into();

        log::debug!("Ranked {} partial way(s) by {ranking}", self.ways.len());
        true
    }

    pub fn write_memory_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use size::Size;
        use std::mem::size_of;
        use thousands::Separable;

        writeln!(out, "AStar Stats:")?;
        let s = size_of::<Node<I, C>>();
        let l = self.search_tree.len();
        let c = self.search_tree.capacity();
        writeln!(
            out,
            "  - |Nodes|:   {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Nodes|*:  {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;

        let s = size_of::<OpenEntry<C>>();
        let l = self.open.len();
        let c = self.open.capacity();
        writeln!(
            out,
            "  - |Open|:    {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Open|*:   {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;

        let s = size_of::<(I, NodeHandle)>();
        let l = self.closed.len();
        let c = self.closed.capacity();
        writeln!(
            out,
            "  - |Closed|:  {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Closed|*: {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;

        writeln!(
            out,
            "  - Expanded nodes: {}",
            self.stats.expanded.separate_with_commas()
        )?;

        Ok(())
    }
}

impl<P, I, C> Debug for AStar<P, I, C>
where
    P: Provider<I, C>,
    I: Index,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("AStar")
            .field("state", &self.state)
            .field("search_tree", &self.search_tree)
            .field("open", &self.open.len())
            .field("closed", &self.closed.len())
            .field("ways", &self.ways.len())
            .field("stats", &self.stats)
            .finish()
    }
}
