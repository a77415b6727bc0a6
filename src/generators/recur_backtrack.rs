use rand::Rng;

use crate::maze::{Coord, Direction, Grid, Tile};

/// Progress reported while a maze is being carved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarveStep {
    /// Every room has been opened; connectors are all still walls.
    RoomsLaid,
    /// The connector at this coordinate was opened.
    WallOpened(Coord),
}

/// Randomized iterative backtracker.
///
/// Rooms live at odd/odd coordinates and the cells between them are the walls that
/// may be carved. Starting from room (1, 1), repeatedly opens the wall towards a
/// random unvisited room two cells away and moves there, backtracking along an
/// explicit stack when the current room has no unvisited neighbors left.
/// The result is a spanning tree over all rooms.
pub fn recursive_backtrack<R, F>(grid: &mut Grid, rng: &mut R, mut on_step: F)
where
    R: Rng + ?Sized,
    F: FnMut(&Grid, CarveStep),
{
    grid.fill_walls();
    grid.reset_overlay();
    for coord in grid.coords() {
        if grid.is_room(coord) && !grid.is_border(coord) {
            grid.set_tile(coord, Tile::Passage);
        }
    }
    on_step(grid, CarveStep::RoomsLaid);

    // Generation-time bookkeeping only, separate from the solver overlay
    let mut visited = grid.plane(false);
    let origin = Coord::new(1, 1);
    visited[origin] = true;

    // The stack keeps only rooms
    let mut stack = vec![origin];
    let mut opened = 0usize;

    while let Some(&room) = stack.last() {
        let candidates = Direction::ALL
            .into_iter()
            .filter_map(|dir| room.step(dir, 1).zip(room.step(dir, 2)))
            .filter(|&(_, next)| {
                grid.contains(next) && !grid.is_border(next) && !visited[next]
            })
            .collect::<Vec<_>>();

        if candidates.is_empty() {
            // Dead end, backtrack
            stack.pop();
            continue;
        }

        let (wall, next) = candidates[rng.random_range(0..candidates.len())];
        grid.set_tile(wall, Tile::Passage);
        visited[next] = true;
        opened += 1;
        on_step(grid, CarveStep::WallOpened(wall));
        stack.push(next);
    }

    tracing::debug!(
        "Carved {}x{} maze, opened {} walls",
        grid.rows(),
        grid.cols(),
        opened
    );
}
