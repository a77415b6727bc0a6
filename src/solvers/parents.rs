use crate::maze::{Coord, Grid, Plane};

/// How a cell was reached during a search.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    /// The start cell.
    Root,
    /// Not discovered yet.
    #[default]
    Unset,
    /// Discovered while expanding this cell.
    Predecessor(Coord),
}

/// Per-cell record of the discovering predecessor, one entry per grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentMap {
    parents: Plane<Parent>,
}

impl ParentMap {
    /// A map shaped like `grid` with only `start` discovered.
    pub fn rooted(grid: &Grid, start: Coord) -> Self {
        let mut parents = grid.plane(Parent::Unset);
        parents[start] = Parent::Root;
        ParentMap { parents }
    }

    pub fn get(&self, coord: Coord) -> Parent {
        self.parents[coord]
    }

    pub fn is_discovered(&self, coord: Coord) -> bool {
        self.parents[coord] != Parent::Unset
    }

    /// Records `parent` as the discoverer of `coord`. A cell is only discovered once;
    /// later calls for the same cell are ignored and return `false`.
    pub fn discover(&mut self, coord: Coord, parent: Coord) -> bool {
        if self.is_discovered(coord) {
            return false;
        }
        self.parents[coord] = Parent::Predecessor(parent);
        true
    }

    /// Number of discovered cells, root included.
    pub fn discovered(&self) -> usize {
        self.parents
            .iter()
            .filter(|(_, p)| **p != Parent::Unset)
            .count()
    }

    /// Follows predecessor links from `goal` back to the root.
    /// Returns the cells goal first, root last, or `None` if `goal` was never discovered.
    ///
    /// # Panics
    /// If the links do not reach the root within one step per cell, or run into an
    /// undiscovered cell. Both mean the map was not built by a search.
    pub fn trace(&self, goal: Coord) -> Option<Vec<Coord>> {
        if !self.is_discovered(goal) {
            return None;
        }
        let mut route = Vec::new();
        let mut current = goal;
        for _ in 0..self.parents.len() {
            route.push(current);
            match self.parents[current] {
                Parent::Root => return Some(route),
                Parent::Predecessor(prev) => current = prev,
                Parent::Unset => {
                    panic!("parent chain from {goal} runs into undiscovered cell {current}")
                }
            }
        }
        panic!("parent chain from {goal} does not reach the root; the links form a cycle")
    }
}
