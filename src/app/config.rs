use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{maze::Coord, solvers::Strategy};

/// Smallest accepted side length for interactive sessions.
pub const MIN_SIDE: u16 = 11;
pub const DEFAULT_ROWS: u16 = 21;
pub const DEFAULT_COLS: u16 = 31;
pub const DEFAULT_STRATEGY: Strategy = Strategy::Bfs;
pub const DEFAULT_DELAY_MS: u64 = 40;
pub const MAX_DELAY_MS: u64 = 200;

/// Command line options. Anything left out is asked for interactively.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Number of grid rows (odd, at least 11)
    #[arg(long)]
    pub rows: Option<u16>,
    /// Number of grid columns (odd, at least 11)
    #[arg(long)]
    pub cols: Option<u16>,
    /// Solving strategy: 1/dfs or 2/bfs
    #[arg(long)]
    pub strategy: Option<Strategy>,
    /// Animation delay per step in milliseconds (0..=200)
    #[arg(long)]
    pub delay: Option<u64>,
    /// Seed for maze generation and DFS shuffling
    #[arg(long)]
    pub seed: Option<u64>,
    /// File that receives the log output
    #[arg(long, default_value = "mazesolve.log")]
    pub log_file: PathBuf,
    /// Maximum log level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,
}

/// Validated session parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub rows: u16,
    pub cols: u16,
    pub strategy: Strategy,
    pub delay: Duration,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            strategy: DEFAULT_STRATEGY,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            seed: None,
        }
    }
}

impl Config {
    /// Builds a config from raw values, coercing each into range.
    pub fn new(rows: u16, cols: u16, strategy: Strategy, delay_ms: u64, seed: Option<u64>) -> Self {
        Config {
            rows: coerce_side(rows),
            cols: coerce_side(cols),
            strategy,
            delay: Duration::from_millis(clamp_delay(delay_ms)),
            seed,
        }
    }

    pub fn start(&self) -> Coord {
        Coord::new(1, 1)
    }

    pub fn goal(&self) -> Coord {
        Coord::new(self.rows - 2, self.cols - 2)
    }
}

/// Raises a side length to at least [`MIN_SIDE`] and makes it odd.
pub fn coerce_side(n: u16) -> u16 {
    let side = n.max(MIN_SIDE);
    // The largest even u16 is u16::MAX - 1, so this cannot overflow
    let side = if side % 2 == 0 { side + 1 } else { side };
    if side != n {
        tracing::warn!("Side length {} coerced to {}", n, side);
    }
    side
}

pub fn clamp_delay(ms: u64) -> u64 {
    let clamped = ms.min(MAX_DELAY_MS);
    if clamped != ms {
        tracing::warn!("Animation delay {}ms clamped to {}ms", ms, clamped);
    }
    clamped
}

/// Largest odd side length that fits in `term_size` terminal cells when each grid
/// cell occupies `cell_size` of them. Never below [`MIN_SIDE`].
pub fn max_side(term_size: u16, cell_size: u16) -> u16 {
    let n = term_size / cell_size.max(1);
    let odd = if n % 2 == 0 { n.saturating_sub(1) } else { n };
    odd.max(MIN_SIDE)
}
