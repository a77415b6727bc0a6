use super::{Coord, Mark, Plane, Tile};
use crate::error::MazeError;

/// The maze: a wall plane plus a traversal overlay of the same shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: Plane<Tile>,
    marks: Plane<Mark>,
}

impl Grid {
    /// Smallest side length that still leaves one room inside the border.
    pub const MIN_SIDE: u16 = 3;

    /// Creates a grid where every cell is a wall and the overlay is clear.
    /// Both dimensions must be odd and at least [`Grid::MIN_SIDE`].
    pub fn new(rows: u16, cols: u16) -> Result<Self, MazeError> {
        if rows < Self::MIN_SIDE || cols < Self::MIN_SIDE {
            return Err(MazeError::TooSmall {
                rows,
                cols,
                min: Self::MIN_SIDE,
            });
        }
        if rows % 2 == 0 || cols % 2 == 0 {
            return Err(MazeError::EvenDimension { rows, cols });
        }
        Ok(Grid {
            tiles: Plane::new(rows, cols, Tile::Wall),
            marks: Plane::new(rows, cols, Mark::Unvisited),
        })
    }

    pub fn rows(&self) -> u16 {
        self.tiles.rows()
    }

    pub fn cols(&self) -> u16 {
        self.tiles.cols()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.tiles.contains(coord)
    }

    pub fn is_border(&self, coord: Coord) -> bool {
        coord.row == 0
            || coord.col == 0
            || coord.row == self.rows() - 1
            || coord.col == self.cols() - 1
    }

    /// Rooms are the odd/odd cells the generator opens up.
    pub fn is_room(&self, coord: Coord) -> bool {
        self.contains(coord) && coord.row % 2 == 1 && coord.col % 2 == 1
    }

    pub fn tile(&self, coord: Coord) -> Tile {
        self.tiles[coord]
    }

    pub fn set_tile(&mut self, coord: Coord, tile: Tile) {
        self.tiles[coord] = tile;
    }

    /// Out-of-bounds coordinates are never passages.
    pub fn is_passage(&self, coord: Coord) -> bool {
        self.contains(coord) && self.tiles[coord] == Tile::Passage
    }

    pub fn tiles(&self) -> &Plane<Tile> {
        &self.tiles
    }

    pub fn mark(&self, coord: Coord) -> Mark {
        self.marks[coord]
    }

    pub fn set_mark(&mut self, coord: Coord, mark: Mark) {
        self.marks[coord] = mark;
    }

    /// Drops `mark` from the cell, leaving it `Unvisited`.
    /// Does nothing if the cell currently carries a different mark.
    pub fn clear_mark(&mut self, coord: Coord, mark: Mark) {
        if self.marks[coord] == mark {
            self.marks[coord] = Mark::Unvisited;
        }
    }

    pub fn marks(&self) -> &Plane<Mark> {
        &self.marks
    }

    pub fn reset_overlay(&mut self) {
        self.marks.fill(Mark::Unvisited);
    }

    /// Turns every cell back into a wall. The overlay is left alone.
    pub fn fill_walls(&mut self) {
        self.tiles.fill(Tile::Wall);
    }

    /// Every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let cols = self.cols();
        (0..self.rows()).flat_map(move |row| (0..cols).map(move |col| Coord::new(row, col)))
    }

    /// A scratch plane with this grid's shape.
    pub fn plane<T: Clone>(&self, fill: T) -> Plane<T> {
        Plane::new(self.rows(), self.cols(), fill)
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Tile;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.tiles[index]
    }
}
