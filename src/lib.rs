//! Perfect-maze generation and BFS/DFS solving with a terminal animation front end.
//!
//! The core lives in [`maze`], [`generators`] and [`solvers`]; [`app`] drives it
//! from an interactive terminal session.

pub mod app;
pub mod error;
pub mod generators;
pub mod maze;
pub mod solvers;

pub use error::MazeError;
