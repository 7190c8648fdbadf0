//! Randomized depth-first carving over an explicit stack.
//!
//! Only ever steps into unvisited cells, so the passages form a spanning
//! tree: exactly one simple path between any two cells.

use log::debug;

use crate::grid::{Dir, Pos, WallGrid};
use crate::rng::MazeRng;

#[derive(Clone, Copy)]
struct Frame {
    pos: Pos,
    entry: Option<Dir>,
}

/// Carve a perfect maze into `grid` (expected fully walled) and return the
/// randomly chosen root cell. `straightness` is the percent chance, clamped
/// to `[0, 100]`, of continuing in the direction a cell was entered from.
pub fn carve_spanning_tree(grid: &mut WallGrid, rng: &mut MazeRng, straightness: u32) -> Pos {
    let straightness = straightness.min(100);
    let (w, h) = (grid.w(), grid.h());

    let start = Pos::new(
        rng.int_range(0, w as u32) as usize,
        rng.int_range(0, h as u32) as usize,
    );
    let mut visited = vec![false; w * h];
    visited[grid.idx(start.x, start.y)] = true;
    let mut stack = vec![Frame {
        pos: start,
        entry: None,
    }];
    let mut carved = 0usize;
    let mut candidates: Vec<Dir> = Vec::with_capacity(4);

    while let Some(&top) = stack.last() {
        candidates.clear();
        for dir in Dir::ALL {
            if let Some(next) = grid.step(top.pos, dir) {
                if !visited[grid.idx(next.x, next.y)] {
                    candidates.push(dir);
                }
            }
        }

        if candidates.is_empty() {
            stack.pop();
            continue;
        }

        let chosen = match top.entry {
            Some(prev) if rng.int_range(0, 100) < straightness && candidates.contains(&prev) => {
                prev
            }
            _ => candidates[rng.int_range(0, candidates.len() as u32) as usize],
        };

        let Some(next) = grid.carve(top.pos, chosen) else {
            continue;
        };
        visited[grid.idx(next.x, next.y)] = true;
        carved += 1;
        stack.push(Frame {
            pos: next,
            entry: Some(chosen),
        });
    }

    debug!(
        "carved {}x{} spanning tree from ({}, {}): {} passages",
        w, h, start.x, start.y, carved
    );
    start
}
