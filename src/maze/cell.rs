/// Wall state of a single grid cell.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    #[default]
    Wall,
    Passage,
}

/// Traversal state of a single grid cell, layered on top of its [`Tile`].
///
/// A search moves cells through `Unvisited -> Frontier -> Visited`.
/// Path reconstruction then overwrites the cells it walks with `OnPath`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// Not yet discovered by the current search.
    #[default]
    Unvisited,
    /// Discovered and waiting in the frontier container.
    Frontier,
    /// Popped from the frontier and settled.
    Visited,
    /// Part of the reconstructed route from start to goal.
    OnPath,
}
