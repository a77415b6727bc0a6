use std::fmt;

use thiserror::Error;

use crate::maze::Coord;

/// Which end of a search a coordinate was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Errors raised when a grid or a solve request breaks the maze contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("grid dimensions must both be odd, got {rows}x{cols}")]
    EvenDimension { rows: u16, cols: u16 },
    #[error("grid dimensions must both be at least {min}, got {rows}x{cols}")]
    TooSmall { rows: u16, cols: u16, min: u16 },
    #[error("{endpoint} {coord} lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        endpoint: Endpoint,
        coord: Coord,
        rows: u16,
        cols: u16,
    },
    #[error("{endpoint} {coord} is a wall, not a passage")]
    NotPassage { endpoint: Endpoint, coord: Coord },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy {0:?}, expected 1/dfs or 2/bfs")]
pub struct ParseStrategyError(pub String);
