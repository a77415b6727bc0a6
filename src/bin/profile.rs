use std::time::Instant;

use mazesolve::{
    generators::{generate_maze, get_rng},
    maze::{Coord, Grid},
    solvers::{Silent, Strategy, solve_maze},
};

const SIDE: u16 = 501;

fn main() -> Result<(), mazesolve::MazeError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1);

    let mut grid = Grid::new(SIDE, SIDE)?;
    let start = Coord::new(1, 1);
    let goal = Coord::new(SIDE - 2, SIDE - 2);

    for iter in 0..num_iters {
        let started = Instant::now();
        generate_maze(&mut grid, Some(iter));
        tracing::info!("[{}] generated {}x{} in {:?}", iter, SIDE, SIDE, started.elapsed());

        let mut rng = get_rng(Some(iter));
        for strategy in [Strategy::Bfs, Strategy::Dfs] {
            let started = Instant::now();
            let solution = solve_maze(&mut grid, start, goal, strategy, &mut rng, &mut Silent)?;
            tracing::info!(
                "[{}] {} solved in {:?}, path {:?} cells, {} discovered",
                iter,
                strategy,
                started.elapsed(),
                solution.path_len(),
                solution.parents.discovered()
            );
        }
    }
    Ok(())
}
