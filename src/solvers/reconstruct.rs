use super::{Observer, Phase, Snapshot, parents::ParentMap};
use crate::maze::{Coord, Grid, Mark};

/// Marks the route to `goal` recorded in `parents` as `OnPath`, one cell per snapshot,
/// walking from the goal back to the start.
///
/// Returns the route start first, or `None` without touching the overlay when the
/// goal was never discovered.
pub(crate) fn reconstruct_path<O>(
    grid: &mut Grid,
    parents: &ParentMap,
    start: Coord,
    goal: Coord,
    observer: &mut O,
) -> Option<Vec<Coord>>
where
    O: Observer + ?Sized,
{
    let mut route = parents.trace(goal)?;
    for &cell in &route {
        grid.set_mark(cell, Mark::OnPath);
        observer.observe(&Snapshot {
            grid: &*grid,
            start,
            goal,
            phase: Phase::Trace,
            changed: &[cell],
        });
    }
    route.reverse();
    Some(route)
}
