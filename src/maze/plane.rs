use super::Coord;

/// A row-major, bounds-checked 2-D buffer indexed by [`Coord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane<T> {
    data: Box<[T]>,
    rows: u16,
    cols: u16,
}

impl<T: Clone> Plane<T> {
    pub fn new(rows: u16, cols: u16, fill: T) -> Self {
        let data = vec![fill; rows as usize * cols as usize].into_boxed_slice();
        Plane { data, rows, cols }
    }

    /// Overwrites every entry with `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> Plane<T> {
    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    fn ravel_index(&self, coord: Coord) -> usize {
        if !self.contains(coord) {
            panic!(
                "coordinate {} is out of bounds for a {}x{} plane",
                coord, self.rows, self.cols
            );
        }
        // Overflow-safe since rows and cols are u16 (assuming usize is at least 32 bits)
        coord.row as usize * self.cols as usize + coord.col as usize
    }

    /// Iterates over entries in row-major order together with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> {
        let cols = self.cols as usize;
        self.data.iter().enumerate().map(move |(i, value)| {
            let coord = Coord::new((i / cols) as u16, (i % cols) as u16);
            (coord, value)
        })
    }
}

impl<T> std::ops::Index<Coord> for Plane<T> {
    type Output = T;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.data[self.ravel_index(index)]
    }
}

impl<T> std::ops::IndexMut<Coord> for Plane<T> {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        let idx = self.ravel_index(index);
        &mut self.data[idx]
    }
}
