use std::collections::VecDeque;

use crate::grid::{Dir, Pos, WallGrid};

/// BFS distance from `start` to every cell through open passages; `-1` for
/// cells that cannot be reached.
pub fn distances(grid: &WallGrid, start: Pos) -> Vec<i32> {
    bfs(grid, start).0
}

/// The cell farthest from `start`. Ties go to the cell BFS discovers first,
/// with neighbours visited N, E, S, W.
pub fn farthest_cell(grid: &WallGrid, start: Pos) -> (Pos, i32) {
    let (_, best, best_d) = bfs(grid, start);
    (best, best_d)
}

fn bfs(grid: &WallGrid, start: Pos) -> (Vec<i32>, Pos, i32) {
    let mut dist = vec![-1; grid.w() * grid.h()];
    let mut q = VecDeque::with_capacity(grid.w() * grid.h());
    dist[grid.idx(start.x, start.y)] = 0;
    q.push_back(start);

    let mut best = start;
    let mut best_d = 0;

    while let Some(pos) = q.pop_front() {
        let base = dist[grid.idx(pos.x, pos.y)];
        if base > best_d {
            best = pos;
            best_d = base;
        }
        for dir in Dir::ALL {
            let Some(next) = grid.step(pos, dir) else {
                continue;
            };
            if !grid.can_move(pos.x, pos.y, dir) {
                continue;
            }
            let i = grid.idx(next.x, next.y);
            if dist[i] == -1 {
                dist[i] = base + 1;
                q.push_back(next);
            }
        }
    }
    (dist, best, best_d)
}
