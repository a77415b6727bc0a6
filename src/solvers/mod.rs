mod frontier;
mod parents;
mod reconstruct;
mod search;

use std::str::FromStr;

use rand::Rng;

pub use frontier::{Frontier, Queue, Stack};
pub use parents::{Parent, ParentMap};

use crate::error::{Endpoint, MazeError, ParseStrategyError};
use crate::maze::{Coord, Grid};
use reconstruct::reconstruct_path;
use search::explore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Dfs,
    Bfs,
}

impl Strategy {
    /// Numeric code used by the menus: 1 for DFS, 2 for BFS.
    pub fn code(self) -> u8 {
        match self {
            Strategy::Dfs => 1,
            Strategy::Bfs => 2,
        }
    }

    /// BFS scans neighbors in a fixed order; DFS reshuffles them on every expansion
    /// so that repeated runs explore differently.
    pub fn default_order(self) -> NeighborOrder {
        match self {
            Strategy::Dfs => NeighborOrder::Shuffled,
            Strategy::Bfs => NeighborOrder::Fixed,
        }
    }

    /// The other strategy.
    pub fn toggled(self) -> Self {
        match self {
            Strategy::Dfs => Strategy::Bfs,
            Strategy::Bfs => Strategy::Dfs,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Dfs => write!(f, "Depth-First Search (DFS)"),
            Strategy::Bfs => write!(f, "Breadth-First Search (BFS)"),
        }
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "dfs" => Ok(Strategy::Dfs),
            "2" | "bfs" => Ok(Strategy::Bfs),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Order in which the four neighbors of an expanded cell are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborOrder {
    /// Up, down, left, right.
    Fixed,
    /// A fresh random permutation for every expansion.
    Shuffled,
}

/// Which part of a solve produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A cell was popped from the frontier and visited for the first time.
    Explore,
    /// A cell was marked as part of the reconstructed route.
    Trace,
}

/// Read-only view of the grid handed to an [`Observer`] after each step.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub start: Coord,
    pub goal: Coord,
    pub phase: Phase,
    /// Cells whose mark changed since the previous snapshot.
    pub changed: &'a [Coord],
}

/// Receives a snapshot once per visited cell and once per route cell.
pub trait Observer {
    fn observe(&mut self, snapshot: &Snapshot<'_>);
}

/// Observer that ignores every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Observer for Silent {
    fn observe(&mut self, _snapshot: &Snapshot<'_>) {}
}

impl<F: FnMut(&Snapshot<'_>)> Observer for F {
    fn observe(&mut self, snapshot: &Snapshot<'_>) {
        self(snapshot)
    }
}

/// Result of a single solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub strategy: Strategy,
    pub parents: ParentMap,
    /// Route from start to goal, both included. `None` if the goal is unreachable.
    pub path: Option<Vec<Coord>>,
}

impl Solution {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of cells on the route.
    pub fn path_len(&self) -> Option<usize> {
        self.path.as_ref().map(Vec::len)
    }
}

/// A traversal strategy together with its neighbor scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solver {
    strategy: Strategy,
    order: NeighborOrder,
}

impl Solver {
    pub fn new(strategy: Strategy) -> Self {
        Solver {
            strategy,
            order: strategy.default_order(),
        }
    }

    pub fn with_order(self, order: NeighborOrder) -> Self {
        Solver { order, ..self }
    }

    pub fn order(&self) -> NeighborOrder {
        self.order
    }

    /// Clears the overlay, searches from `start` to `goal`, and marks the route found.
    ///
    /// `rng` is only consulted when the neighbor order is shuffled.
    /// Fails if either endpoint is outside the grid or on a wall. An unreachable goal
    /// is not an error: the returned solution has no path.
    pub fn solve<R, O>(
        &self,
        grid: &mut Grid,
        start: Coord,
        goal: Coord,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<Solution, MazeError>
    where
        R: Rng + ?Sized,
        O: Observer + ?Sized,
    {
        check_endpoint(grid, start, Endpoint::Start)?;
        check_endpoint(grid, goal, Endpoint::Goal)?;

        grid.reset_overlay();
        let parents = match self.strategy {
            Strategy::Bfs => explore(
                grid,
                start,
                goal,
                Queue::default(),
                self.order,
                rng,
                observer,
            ),
            Strategy::Dfs => explore(
                grid,
                start,
                goal,
                Stack::default(),
                self.order,
                rng,
                observer,
            ),
        };
        let path = reconstruct_path(grid, &parents, start, goal, observer);

        match &path {
            Some(route) => tracing::debug!("{} found a {}-cell route", self.strategy, route.len()),
            None => tracing::debug!("{} found no route to {}", self.strategy, goal),
        }
        Ok(Solution {
            strategy: self.strategy,
            parents,
            path,
        })
    }
}

/// Solves with the strategy's default neighbor order.
pub fn solve_maze<R, O>(
    grid: &mut Grid,
    start: Coord,
    goal: Coord,
    strategy: Strategy,
    rng: &mut R,
    observer: &mut O,
) -> Result<Solution, MazeError>
where
    R: Rng + ?Sized,
    O: Observer + ?Sized,
{
    Solver::new(strategy).solve(grid, start, goal, rng, observer)
}

fn check_endpoint(grid: &Grid, coord: Coord, endpoint: Endpoint) -> Result<(), MazeError> {
    if !grid.contains(coord) {
        return Err(MazeError::OutOfBounds {
            endpoint,
            coord,
            rows: grid.rows(),
            cols: grid.cols(),
        });
    }
    if !grid.is_passage(coord) {
        return Err(MazeError::NotPassage { endpoint, coord });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::generators::generate_maze;
    use crate::maze::{Direction, Mark, Tile, grid_from_rows};

    #[derive(Default)]
    struct Recorder {
        explored: Vec<Coord>,
        traced: Vec<Coord>,
    }

    impl Observer for Recorder {
        fn observe(&mut self, snapshot: &Snapshot<'_>) {
            match snapshot.phase {
                Phase::Explore => {
                    let cell = *snapshot.changed.last().unwrap();
                    assert_eq!(snapshot.grid.mark(cell), Mark::Visited);
                    self.explored.push(cell);
                }
                Phase::Trace => {
                    assert_eq!(snapshot.changed.len(), 1);
                    assert_eq!(snapshot.grid.mark(snapshot.changed[0]), Mark::OnPath);
                    self.traced.push(snapshot.changed[0]);
                }
            }
        }
    }

    /// Independent shortest route length in cells, or `None` if unreachable.
    fn shortest_len(grid: &Grid, start: Coord, goal: Coord) -> Option<usize> {
        let mut dist = grid.plane(None::<usize>);
        dist[start] = Some(1);
        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            let d = dist[cell].unwrap();
            for next in Direction::ALL.into_iter().filter_map(|dir| cell.step(dir, 1)) {
                if grid.is_passage(next) && dist[next].is_none() {
                    dist[next] = Some(d + 1);
                    queue.push_back(next);
                }
            }
        }
        dist[goal]
    }

    fn assert_valid_route(grid: &Grid, route: &[Coord], start: Coord, goal: Coord) {
        assert_eq!(route.first(), Some(&start));
        assert_eq!(route.last(), Some(&goal));
        assert!(route.iter().all(|&c| grid.is_passage(c)));
        assert!(route.windows(2).all(|w| w[0].is_adjacent(w[1])));
        let unique = route.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), route.len(), "route revisits a cell");
    }

    /// A grid whose whole interior is open, so many routes exist.
    fn open_room(side: u16) -> Grid {
        let mut grid = Grid::new(side, side).unwrap();
        for coord in grid.coords() {
            if !grid.is_border(coord) {
                grid.set_tile(coord, Tile::Passage);
            }
        }
        grid
    }

    fn passages(grid: &Grid) -> Vec<Coord> {
        grid.coords().filter(|&c| grid.is_passage(c)).collect()
    }

    #[test]
    fn test_s_shaped_maze() {
        let mut grid = grid_from_rows(&[
            "#####", //
            "#...#", //
            "###.#", //
            "#...#", //
            "#####",
        ]);
        let start = Coord::new(1, 1);
        let goal = Coord::new(3, 1);
        let expected = vec![
            Coord::new(1, 1),
            Coord::new(1, 2),
            Coord::new(1, 3),
            Coord::new(2, 3),
            Coord::new(3, 3),
            Coord::new(3, 2),
            Coord::new(3, 1),
        ];
        let mut rng = StdRng::seed_from_u64(0);
        for strategy in [Strategy::Bfs, Strategy::Dfs] {
            let solution =
                solve_maze(&mut grid, start, goal, strategy, &mut rng, &mut Silent).unwrap();
            assert_eq!(solution.path.as_ref(), Some(&expected), "{strategy}");
            assert!(expected.iter().all(|&c| grid.mark(c) == Mark::OnPath));
        }
    }

    #[test]
    fn test_bfs_is_shortest_on_open_rooms() {
        let mut rng = StdRng::seed_from_u64(0);
        for side in [5, 7] {
            let mut grid = open_room(side);
            let start = Coord::new(1, 1);
            for goal in passages(&grid) {
                let solution =
                    solve_maze(&mut grid, start, goal, Strategy::Bfs, &mut rng, &mut Silent)
                        .unwrap();
                let route = solution.path.unwrap();
                assert_valid_route(&grid, &route, start, goal);
                assert_eq!(Some(route.len()), shortest_len(&grid, start, goal));
            }
        }
    }

    #[test]
    fn test_bfs_is_shortest_on_generated_maze() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut grid = Grid::new(11, 15).unwrap();
        generate_maze(&mut grid, Some(42));
        let start = Coord::new(1, 1);
        for goal in passages(&grid) {
            let solution =
                solve_maze(&mut grid, start, goal, Strategy::Bfs, &mut rng, &mut Silent).unwrap();
            assert_eq!(solution.path_len(), shortest_len(&grid, start, goal));
        }
    }

    #[test]
    fn test_dfs_route_is_simple_and_connected() {
        let mut grid = open_room(9);
        let mut maze = Grid::new(21, 21).unwrap();
        generate_maze(&mut maze, Some(3));
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            for g in [&mut grid, &mut maze] {
                let start = Coord::new(1, 1);
                let goal = Coord::new(g.rows() - 2, g.cols() - 2);
                let solution =
                    solve_maze(g, start, goal, Strategy::Dfs, &mut rng, &mut Silent).unwrap();
                assert_valid_route(g, solution.path.as_deref().unwrap(), start, goal);
            }
        }
    }

    #[test]
    fn test_dfs_matches_bfs_in_a_perfect_maze() {
        // A spanning tree has exactly one simple route between two rooms
        let mut grid = Grid::new(21, 31).unwrap();
        generate_maze(&mut grid, Some(8));
        let start = Coord::new(1, 1);
        let goal = Coord::new(19, 29);
        let mut rng = StdRng::seed_from_u64(8);
        let bfs = solve_maze(&mut grid, start, goal, Strategy::Bfs, &mut rng, &mut Silent).unwrap();
        let dfs = solve_maze(&mut grid, start, goal, Strategy::Dfs, &mut rng, &mut Silent).unwrap();
        assert_eq!(bfs.path, dfs.path);
    }

    #[test]
    fn test_dfs_can_be_longer_than_bfs() {
        let mut grid = open_room(7);
        let start = Coord::new(1, 1);
        let goal = Coord::new(3, 1);
        let mut rng = StdRng::seed_from_u64(0);

        let dfs = Solver::new(Strategy::Dfs)
            .with_order(NeighborOrder::Fixed)
            .solve(&mut grid, start, goal, &mut rng, &mut Silent)
            .unwrap();
        let bfs = solve_maze(&mut grid, start, goal, Strategy::Bfs, &mut rng, &mut Silent).unwrap();

        assert_eq!(bfs.path_len(), Some(3));
        // Sweeps the top row, comes down the right side and back along row 3
        assert_eq!(dfs.path_len(), Some(11));
        assert_valid_route(&grid, dfs.path.as_deref().unwrap(), start, goal);
    }

    #[test]
    fn test_isolated_goal_has_no_path() {
        let mut grid = Grid::new(11, 11).unwrap();
        generate_maze(&mut grid, Some(5));
        let start = Coord::new(1, 1);
        let goal = Coord::new(9, 9);
        for next in Direction::ALL.into_iter().filter_map(|d| goal.step(d, 1)) {
            grid.set_tile(next, Tile::Wall);
        }

        let mut rng = StdRng::seed_from_u64(5);
        for strategy in [Strategy::Bfs, Strategy::Dfs] {
            let mut recorder = Recorder::default();
            let solution =
                solve_maze(&mut grid, start, goal, strategy, &mut rng, &mut recorder).unwrap();
            assert!(!solution.found(), "{strategy}");
            assert_eq!(solution.parents.get(goal), Parent::Unset);
            assert!(recorder.traced.is_empty());
            assert!(grid.coords().all(|c| grid.mark(c) != Mark::OnPath));
            assert_eq!(grid.mark(goal), Mark::Unvisited);
            // Everything reachable from the start was settled
            assert_eq!(recorder.explored.len(), solution.parents.discovered());
        }
    }

    #[test]
    fn test_repeated_solves_are_identical() {
        let mut grid = Grid::new(21, 21).unwrap();
        generate_maze(&mut grid, Some(17));
        let start = Coord::new(1, 1);
        let goal = Coord::new(19, 19);

        let mut run = |strategy: Strategy, seed: u64| {
            grid.reset_overlay();
            let mut rng = StdRng::seed_from_u64(seed);
            solve_maze(&mut grid, start, goal, strategy, &mut rng, &mut Silent).unwrap()
        };
        assert_eq!(run(Strategy::Bfs, 1), run(Strategy::Bfs, 2));
        assert_eq!(run(Strategy::Dfs, 3), run(Strategy::Dfs, 3));
    }

    #[test]
    fn test_repeated_open_room_solves_are_identical() {
        let mut grid = open_room(9);
        let start = Coord::new(1, 1);
        let goal = Coord::new(7, 7);
        let mut first = StdRng::seed_from_u64(21);
        let mut second = StdRng::seed_from_u64(21);
        let a = solve_maze(&mut grid, start, goal, Strategy::Dfs, &mut first, &mut Silent).unwrap();
        let b =
            solve_maze(&mut grid, start, goal, Strategy::Dfs, &mut second, &mut Silent).unwrap();
        assert_eq!(a.parents, b.parents);
        assert_eq!(a.path, b.path);
    }

    #[test]
    fn test_snapshot_counts() {
        let mut grid = Grid::new(15, 15).unwrap();
        generate_maze(&mut grid, Some(2));
        let start = Coord::new(1, 1);
        let goal = Coord::new(13, 13);
        let mut rng = StdRng::seed_from_u64(2);
        for strategy in [Strategy::Bfs, Strategy::Dfs] {
            let mut recorder = Recorder::default();
            let solution =
                solve_maze(&mut grid, start, goal, strategy, &mut rng, &mut recorder).unwrap();
            let settled = grid
                .coords()
                .filter(|&c| matches!(grid.mark(c), Mark::Visited | Mark::OnPath))
                .count();
            // One visit event per settled cell, never repeated
            assert_eq!(recorder.explored.len(), settled);
            let unique = recorder.explored.iter().collect::<HashSet<_>>();
            assert_eq!(unique.len(), recorder.explored.len());
            assert_eq!(recorder.explored.first(), Some(&start));
            assert_eq!(recorder.explored.last(), Some(&goal));
            // One trace event per route cell, walked goal first
            let mut route = solution.path.unwrap();
            route.reverse();
            assert_eq!(recorder.traced, route);
        }
    }

    #[test]
    fn test_closure_observer() {
        let mut grid = Grid::new(11, 11).unwrap();
        generate_maze(&mut grid, Some(8));
        let (start, goal) = (Coord::new(1, 1), Coord::new(9, 9));
        let mut rng = StdRng::seed_from_u64(8);
        let (mut explores, mut traces) = (0usize, 0usize);
        let mut on_snapshot = |snapshot: &Snapshot<'_>| match snapshot.phase {
            Phase::Explore => explores += 1,
            Phase::Trace => traces += 1,
        };
        let solution =
            solve_maze(&mut grid, start, goal, Strategy::Bfs, &mut rng, &mut on_snapshot).unwrap();
        let settled = grid
            .marks()
            .iter()
            .filter(|(_, mark)| matches!(mark, Mark::Visited | Mark::OnPath))
            .count();
        assert_eq!(explores, settled);
        assert_eq!(Some(traces), solution.path_len());
    }

    #[test]
    fn test_parent_links_point_to_neighbors() {
        let mut grid = open_room(9);
        let mut rng = StdRng::seed_from_u64(4);
        let start = Coord::new(4, 4);
        let solution = solve_maze(
            &mut grid,
            start,
            Coord::new(7, 7),
            Strategy::Dfs,
            &mut rng,
            &mut Silent,
        )
        .unwrap();
        for coord in grid.coords() {
            match solution.parents.get(coord) {
                Parent::Root => assert_eq!(coord, start),
                Parent::Predecessor(prev) => assert!(prev.is_adjacent(coord)),
                Parent::Unset => {}
            }
            // Every discovered cell can be traced back to the start
            if solution.parents.is_discovered(coord) {
                let trace = solution.parents.trace(coord).unwrap();
                assert_eq!(trace.last(), Some(&start));
            }
        }
    }

    #[test]
    fn test_start_is_goal() {
        let mut grid = open_room(5);
        let c = Coord::new(2, 2);
        let mut rng = StdRng::seed_from_u64(0);
        let solution = solve_maze(&mut grid, c, c, Strategy::Bfs, &mut rng, &mut Silent).unwrap();
        assert_eq!(solution.path, Some(vec![c]));
        assert_eq!(solution.parents.discovered(), 1);
    }

    #[test]
    fn test_rejects_bad_endpoints() {
        let mut grid = open_room(5);
        let mut rng = StdRng::seed_from_u64(0);
        let err = solve_maze(
            &mut grid,
            Coord::new(0, 0),
            Coord::new(1, 1),
            Strategy::Bfs,
            &mut rng,
            &mut Silent,
        )
        .unwrap_err();
        assert_eq!(
            err,
            MazeError::NotPassage {
                endpoint: Endpoint::Start,
                coord: Coord::new(0, 0)
            }
        );

        let err = solve_maze(
            &mut grid,
            Coord::new(1, 1),
            Coord::new(9, 1),
            Strategy::Dfs,
            &mut rng,
            &mut Silent,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MazeError::OutOfBounds {
                endpoint: Endpoint::Goal,
                ..
            }
        ));
    }

    #[test]
    fn test_solve_resets_previous_overlay() {
        let mut grid = open_room(7);
        grid.set_mark(Coord::new(5, 5), Mark::OnPath);
        let mut rng = StdRng::seed_from_u64(0);
        let solution = solve_maze(
            &mut grid,
            Coord::new(1, 1),
            Coord::new(1, 2),
            Strategy::Bfs,
            &mut rng,
            &mut Silent,
        )
        .unwrap();
        assert!(solution.found());
        assert_ne!(grid.mark(Coord::new(5, 5)), Mark::OnPath);
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("1".parse::<Strategy>(), Ok(Strategy::Dfs));
        assert_eq!("BFS".parse::<Strategy>(), Ok(Strategy::Bfs));
        assert_eq!(" dfs ".parse::<Strategy>(), Ok(Strategy::Dfs));
        assert!("3".parse::<Strategy>().is_err());
        assert_eq!(Strategy::Bfs.code(), 2);
        assert_eq!(Strategy::Dfs.toggled(), Strategy::Bfs);
        assert_eq!(Solver::new(Strategy::Dfs).order(), NeighborOrder::Shuffled);
        assert_eq!(Solver::new(Strategy::Bfs).order(), NeighborOrder::Fixed);
    }
}
