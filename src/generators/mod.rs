use rand::{SeedableRng, rngs::StdRng};

mod recur_backtrack;

pub use recur_backtrack::{CarveStep, recursive_backtrack};

use crate::maze::Grid;

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Carves a perfect maze into `grid`, replacing whatever it held before.
pub fn generate_maze(grid: &mut Grid, seed: Option<u64>) {
    let mut rng = get_rng(seed);
    recursive_backtrack(grid, &mut rng, |_, _| {});
}
