pub mod cell;
mod grid;
mod plane;

use std::fmt;

pub use cell::{Mark, Tile};
pub use grid::Grid;
pub use plane::Plane;

/// A cell position, row first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: u16,
    pub col: u16,
}

impl Coord {
    pub const fn new(row: u16, col: u16) -> Self {
        Coord { row, col }
    }

    /// Moves `distance` cells in `direction`.
    /// Returns `None` when the move would go above row 0 or left of column 0, or overflow `u16`.
    /// Whether the result is inside a particular grid is left to `Grid::contains`.
    pub fn step(self, direction: Direction, distance: u16) -> Option<Coord> {
        let Coord { row, col } = self;
        match direction {
            Direction::Up => row.checked_sub(distance).map(|row| Coord { row, col }),
            Direction::Down => row.checked_add(distance).map(|row| Coord { row, col }),
            Direction::Left => col.checked_sub(distance).map(|col| Coord { row, col }),
            Direction::Right => col.checked_add(distance).map(|col| Coord { row, col }),
        }
    }

    /// Checks whether two coordinates share an edge.
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Scan order used wherever neighbors are inspected without shuffling.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Builds a grid from rows of `#` (wall) and `.` (passage).
#[cfg(test)]
pub(crate) fn grid_from_rows(rows: &[&str]) -> Grid {
    let height = rows.len() as u16;
    let width = rows[0].len() as u16;
    let mut grid = Grid::new(height, width).expect("fixture must have odd dimensions");
    for (r, line) in rows.iter().enumerate() {
        assert_eq!(line.len() as u16, width, "ragged fixture row {r}");
        for (c, ch) in line.chars().enumerate() {
            let tile = match ch {
                '#' => Tile::Wall,
                '.' => Tile::Passage,
                other => panic!("unexpected fixture character {other:?}"),
            };
            grid.set_tile(Coord::new(r as u16, c as u16), tile);
        }
    }
    grid
}
