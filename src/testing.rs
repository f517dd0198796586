//! Small search spaces for the unit tests.

use std::sync::Arc;
use std::sync::Mutex;

use nonmax::NonMaxUsize;
use rand::Rng;
use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

use crate::cost::Cost;
use crate::node::Node;
use crate::node::NodeHandle;
use crate::provider::Neighbours;
use crate::provider::Provider;

pub(crate) fn handle(i: usize) -> NodeHandle {
    let Some(i) = NonMaxUsize::new(i) else {
        panic!("test handles are small");
    };
    NodeHandle::new(i)
}

/// Integers `0..len` on a line, each one step from the next.
///
/// Heuristic is the absolute difference, edges cost 1.
#[derive(Clone, Debug)]
pub(crate) struct LineProvider {
    len: i32,
    occupancy: u32,
    walls: FxHashSet<(i32, i32)>,
}

impl LineProvider {
    pub(crate) fn new(len: i32) -> Self {
        Self {
            len,
            occupancy: 0,
            walls: FxHashSet::default(),
        }
    }
    pub(crate) fn with_occupancy(mut self, occupancy: u32) -> Self {
        self.occupancy = occupancy;
        self
    }
    /// Makes moving from `from` to `to` infeasible (one way).
    pub(crate) fn with_wall(mut self, from: i32, to: i32) -> Self {
        self.walls.insert((from, to));
        self
    }
}

impl Provider<i32, u32> for LineProvider {
    fn edge_cost(&self, from: Option<&i32>, to: &i32) -> u32 {
        match from {
            None => self.occupancy,
            Some(from) if self.walls.contains(&(*from, *to)) => u32::infeasible(),
            Some(_) => 1,
        }
    }
    fn heuristic(&self, index: &i32, goal: &i32) -> u32 {
        index.abs_diff(*goal)
    }
    fn find_neighbours(&self, node: &Node<i32, u32>) -> Neighbours<i32> {
        let i = *node.index();
        [i - 1, i + 1]
            .into_iter()
            .filter(|n| (0..self.len).contains(n))
            .collect()
    }
}

/// Same line, but the neighbours come from a list shared with other threads.
#[derive(Debug)]
pub(crate) struct SharedLineProvider {
    pub(crate) line: LineProvider,
    pub(crate) lists: FxHashMap<i32, Arc<Mutex<Vec<i32>>>>,
}

impl SharedLineProvider {
    pub(crate) fn new(len: i32) -> Self {
        let lists = (0..len)
            .map(|i| {
                let neighbours: Vec<i32> = [i - 1, i + 1]
                    .into_iter()
                    .filter(|n| (0..len).contains(n))
                    .collect();
                (i, Arc::new(Mutex::new(neighbours)))
            })
            .collect();
        Self {
            line: LineProvider::new(len),
            lists,
        }
    }
}

impl Provider<i32, u32> for SharedLineProvider {
    fn edge_cost(&self, from: Option<&i32>, to: &i32) -> u32 {
        self.line.edge_cost(from, to)
    }
    fn heuristic(&self, index: &i32, goal: &i32) -> u32 {
        self.line.heuristic(index, goal)
    }
    fn find_neighbours(&self, node: &Node<i32, u32>) -> Neighbours<i32> {
        match self.lists.get(node.index()) {
            Some(list) => Neighbours::from(Arc::clone(list)),
            None => Neighbours::none(),
        }
    }
}

/// An explicit weighted digraph. Missing edges are infeasible.
#[derive(Clone, Debug)]
pub(crate) struct GraphProvider<C: Cost> {
    edges: FxHashMap<u32, Vec<(u32, C)>>,
    heuristics: FxHashMap<(u32, u32), C>,
}

impl<C: Cost> GraphProvider<C> {
    pub(crate) fn new() -> Self {
        Self {
            edges: FxHashMap::default(),
            heuristics: FxHashMap::default(),
        }
    }
    pub(crate) fn edge(mut self, from: u32, to: u32, c: C) -> Self {
        self.edges.entry(from).or_default().push((to, c));
        self
    }
    pub(crate) fn both_ways(self, a: u32, b: u32, c: C) -> Self {
        self.edge(a, b, c).edge(b, a, c)
    }
    pub(crate) fn h(mut self, index: u32, goal: u32, c: C) -> Self {
        self.heuristics.insert((index, goal), c);
        self
    }
}

impl<C: Cost> Provider<u32, C> for GraphProvider<C> {
    fn edge_cost(&self, from: Option<&u32>, to: &u32) -> C {
        let Some(from) = from else {
            return C::zero();
        };
        self.edges
            .get(from)
            .and_then(|out| out.iter().find(|(n, _)| n == to))
            .map_or_else(C::infeasible, |(_, c)| *c)
    }
    fn heuristic(&self, index: &u32, goal: &u32) -> C {
        self.heuristics
            .get(&(*index, *goal))
            .copied()
            .unwrap_or_else(C::zero)
    }
    fn find_neighbours(&self, node: &Node<u32, C>) -> Neighbours<u32> {
        self.edges
            .get(node.index())
            .map(|out| out.iter().map(|(n, _)| *n).collect())
            .unwrap_or_else(Neighbours::none)
    }
}

pub(crate) type Cell = (u16, u16);

/// A 4-connected grid with walls and per-cell entry costs.
#[derive(Clone, Debug)]
pub(crate) struct GridProvider {
    width: u16,
    height: u16,
    /// `None` is a wall.
    cells: Vec<Option<u32>>,
}

impl GridProvider {
    pub(crate) fn random<R: Rng>(rng: &mut R, width: u16, height: u16, wall_ratio: f64) -> Self {
        let cells = (0..usize::from(width) * usize::from(height))
            .map(|_| {
                if rng.random_bool(wall_ratio) {
                    None
                } else {
                    Some(rng.random_range(1..=4u32))
                }
            })
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub(crate) fn cell(&self, (x, y): Cell) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[usize::from(y) * usize::from(self.width) + usize::from(x)]
    }

    pub(crate) fn open_cells(&self) -> Vec<Cell> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|c| self.cell(*c).is_some())
            .collect()
    }
}

impl Provider<Cell, u32> for GridProvider {
    fn edge_cost(&self, from: Option<&Cell>, to: &Cell) -> u32 {
        match (from, self.cell(*to)) {
            (_, None) => u32::infeasible(),
            (None, Some(_)) => 0,
            (Some(_), Some(c)) => c,
        }
    }
    /// Manhattan distance; every step costs at least 1.
    fn heuristic(&self, index: &Cell, goal: &Cell) -> u32 {
        u32::from(index.0.abs_diff(goal.0)) + u32::from(index.1.abs_diff(goal.1))
    }
    fn find_neighbours(&self, node: &Node<Cell, u32>) -> Neighbours<Cell> {
        let (x, y) = *node.index();
        [
            x.checked_sub(1).map(|x| (x, y)),
            x.checked_add(1).map(|x| (x, y)),
            y.checked_sub(1).map(|y| (x, y)),
            y.checked_add(1).map(|y| (x, y)),
        ]
        .into_iter()
        .flatten()
        .filter(|c| self.cell(*c).is_some())
        .collect()
    }
}
