use log::debug;

use crate::grid::{Dir, Pos, WallGrid};
use crate::rng::MazeRng;

pub const MAX_LOOPS_PERCENT: u32 = 30;

/// Extra passages requested for a `w*h` grid at `loops_percent`.
pub fn target_removals(w: usize, h: usize, loops_percent: u32) -> usize {
    let pct = f64::from(loops_percent.min(MAX_LOOPS_PERCENT));
    ((w * h) as f64 * (pct / 100.0) * 0.5).floor() as usize
}

/// Open random interior walls to add cycles. The outer frame is never
/// breached. Gives up quietly once the attempt budget runs out; returns how
/// many passages were actually opened.
pub fn inject_loops(grid: &mut WallGrid, rng: &mut MazeRng, loops_percent: u32) -> usize {
    let (w, h) = (grid.w(), grid.h());
    let target = target_removals(w, h, loops_percent);
    let mut budget = target * 20 + 200;
    let mut removals = 0;

    while removals < target && budget > 0 {
        budget -= 1;
        let x = rng.int_range(0, w as u32) as usize;
        let y = rng.int_range(0, h as u32) as usize;
        let dir = Dir::ALL[rng.int_range(0, 4) as usize];
        let pos = Pos::new(x, y);

        if grid.step(pos, dir).is_none() {
            continue;
        }
        if opens_frame(pos, dir, w, h) {
            continue;
        }
        if grid.can_move(x, y, dir) {
            continue;
        }

        grid.carve(pos, dir);
        removals += 1;
    }

    if removals < target {
        debug!(
            "loop injection stopped at {}/{} extra passages (budget spent)",
            removals, target
        );
    } else {
        debug!("opened {} extra passages", removals);
    }
    removals
}

fn opens_frame(pos: Pos, dir: Dir, w: usize, h: usize) -> bool {
    match dir {
        Dir::West => pos.x == 0,
        Dir::North => pos.y == 0,
        Dir::East => pos.x + 1 == w,
        Dir::South => pos.y + 1 == h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carve::carve_spanning_tree;

    fn border_closed(grid: &WallGrid) -> bool {
        let (w, h) = (grid.w(), grid.h());
        (0..w).all(|x| !grid.can_move(x, 0, Dir::North) && !grid.can_move(x, h - 1, Dir::South))
            && (0..h).all(|y| !grid.can_move(0, y, Dir::West) && !grid.can_move(w - 1, y, Dir::East))
    }

    #[test]
    fn target_formula() {
        assert_eq!(target_removals(30, 20, 6), 18);
        assert_eq!(target_removals(10, 10, 0), 0);
        assert_eq!(target_removals(10, 10, 30), 15);
        assert_eq!(target_removals(10, 10, 90), 15);
        assert_eq!(target_removals(5, 5, 1), 0);
    }

    #[test]
    fn zero_percent_touches_nothing() {
        let mut grid = WallGrid::new(12, 12);
        let mut rng = MazeRng::new("none");
        carve_spanning_tree(&mut grid, &mut rng, 30);
        let before = grid.clone();
        let state = rng.state();
        assert_eq!(inject_loops(&mut grid, &mut rng, 0), 0);
        assert_eq!(grid, before);
        assert_eq!(rng.state(), state);
    }

    #[test]
    fn adds_requested_passages_inside_frame() {
        let mut grid = WallGrid::new(30, 20);
        let mut rng = MazeRng::new("loops");
        carve_spanning_tree(&mut grid, &mut rng, 30);
        let opened = inject_loops(&mut grid, &mut rng, 20);
        assert_eq!(opened, target_removals(30, 20, 20));
        assert_eq!(grid.open_pairs(), 30 * 20 - 1 + opened);
        assert!(grid.is_symmetric());
        assert!(border_closed(&grid));
    }

    #[test]
    fn exhausted_budget_is_not_an_error() {
        // A single row has no interior wall left once carved.
        let mut grid = WallGrid::new(10, 1);
        let mut rng = MazeRng::new("row");
        carve_spanning_tree(&mut grid, &mut rng, 0);
        assert_eq!(target_removals(10, 1, 30), 1);
        assert_eq!(inject_loops(&mut grid, &mut rng, 30), 0);
        assert_eq!(grid.open_pairs(), 9);
        assert!(border_closed(&grid));
    }

    #[test]
    fn frame_rule() {
        assert!(opens_frame(Pos::new(0, 3), Dir::West, 5, 5));
        assert!(opens_frame(Pos::new(3, 0), Dir::North, 5, 5));
        assert!(opens_frame(Pos::new(4, 2), Dir::East, 5, 5));
        assert!(opens_frame(Pos::new(2, 4), Dir::South, 5, 5));
        assert!(!opens_frame(Pos::new(2, 2), Dir::East, 5, 5));
    }
}
