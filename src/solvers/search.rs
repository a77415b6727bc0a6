use rand::{Rng, seq::SliceRandom};

use super::{NeighborOrder, Observer, Phase, Snapshot, frontier::Frontier, parents::ParentMap};
use crate::maze::{Coord, Direction, Grid, Mark};

/// Traverses the open cells of `grid` from `start` until `goal` is popped or the
/// frontier runs dry, and returns who discovered whom.
///
/// The overlay must be clear when this is called. Every cell that gets
/// marked `Visited` produces exactly one snapshot.
pub(crate) fn explore<F, R, O>(
    grid: &mut Grid,
    start: Coord,
    goal: Coord,
    mut frontier: F,
    order: NeighborOrder,
    rng: &mut R,
    observer: &mut O,
) -> ParentMap
where
    F: Frontier,
    R: Rng + ?Sized,
    O: Observer + ?Sized,
{
    let mut parents = ParentMap::rooted(grid, start);
    // Cells whose mark changed since the last snapshot
    let mut changed = vec![start];
    grid.set_mark(start, Mark::Frontier);
    frontier.push(start);

    let mut visits = 0usize;
    let mut reached = false;
    while let Some(current) = frontier.pop() {
        grid.clear_mark(current, Mark::Frontier);
        if grid.mark(current) != Mark::Visited {
            grid.set_mark(current, Mark::Visited);
            changed.push(current);
            visits += 1;
            observer.observe(&Snapshot {
                grid: &*grid,
                start,
                goal,
                phase: Phase::Explore,
                changed: &changed,
            });
            changed.clear();
        }

        if current == goal {
            reached = true;
            break;
        }

        let mut directions = Direction::ALL;
        if order == NeighborOrder::Shuffled {
            directions.shuffle(rng);
        }
        for next in directions.into_iter().filter_map(|dir| current.step(dir, 1)) {
            // A parent is assigned at first discovery and never again
            if grid.is_passage(next) && parents.discover(next, current) {
                grid.set_mark(next, Mark::Frontier);
                changed.push(next);
                frontier.push(next);
            }
        }
    }

    tracing::debug!(
        "Search from {} to {} visited {} cells, goal reached: {}",
        start,
        goal,
        visits,
        reached
    );
    parents
}
