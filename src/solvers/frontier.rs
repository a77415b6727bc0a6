use std::collections::VecDeque;

use crate::maze::Coord;

/// Container of discovered cells waiting to be expanded.
/// The pop discipline is what separates one traversal strategy from another.
pub trait Frontier {
    fn push(&mut self, coord: Coord);
    fn pop(&mut self) -> Option<Coord>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First in, first out. Drives breadth-first search.
#[derive(Debug, Default)]
pub struct Queue(VecDeque<Coord>);

impl Frontier for Queue {
    fn push(&mut self, coord: Coord) {
        self.0.push_back(coord);
    }

    fn pop(&mut self) -> Option<Coord> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Last in, first out. Drives depth-first search.
#[derive(Debug, Default)]
pub struct Stack(Vec<Coord>);

impl Frontier for Stack {
    fn push(&mut self, coord: Coord) {
        self.0.push(coord);
    }

    fn pop(&mut self) -> Option<Coord> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}
