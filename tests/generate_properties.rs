//! End-to-end properties of `generate` over a spread of sizes, seeds and
//! tuning values.

use mazegen::{generate, Dir, Maze, Pos};

const SEEDS: [&str; 6] = ["1", "", "x", "hello world", "ünïcødé", "42424242"];
const SIZES: [(usize, usize); 6] = [(1, 1), (2, 1), (1, 7), (5, 5), (30, 20), (64, 48)];

fn all_mazes(loops_percent: i32) -> Vec<Maze> {
    let mut out = Vec::new();
    for &(w, h) in &SIZES {
        for seed in SEEDS {
            for straightness in [0, 30, 100] {
                out.push(generate(w, h, 18, seed, loops_percent, straightness).unwrap());
            }
        }
    }
    out
}

fn neighbor(maze: &Maze, pos: Pos, dir: Dir) -> Option<Pos> {
    let (dx, dy) = dir.delta();
    let nx = pos.x as i64 + dx;
    let ny = pos.y as i64 + dy;
    if nx < 0 || ny < 0 || nx >= maze.w() as i64 || ny >= maze.h() as i64 {
        return None;
    }
    Some(Pos::new(nx as usize, ny as usize))
}

#[test]
fn deterministic() {
    for (w, h, seed) in [(30, 20, "1"), (17, 40, "repeat"), (200, 200, "big")] {
        let a = generate(w, h, 18, seed, 12, 55).unwrap();
        let b = generate(w, h, 18, seed, 12, 55).unwrap();
        assert_eq!(a.walls(), b.walls());
        assert_eq!(a.start(), b.start());
        assert_eq!(a.end(), b.end());
    }
}

#[test]
fn walls_are_symmetric_and_frame_is_closed() {
    for loops in [0, 15, 30] {
        for maze in all_mazes(loops) {
            for y in 0..maze.h() {
                for x in 0..maze.w() {
                    let pos = Pos::new(x, y);
                    for dir in Dir::ALL {
                        let open = maze.can_move(x, y, dir);
                        match neighbor(&maze, pos, dir) {
                            Some(n) => assert_eq!(open, maze.can_move(n.x, n.y, dir.opposite())),
                            None => assert!(!open, "frame opened at {:?} {:?}", pos, dir),
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn no_loops_means_spanning_tree() {
    for maze in all_mazes(0) {
        let cells = maze.w() * maze.h();
        assert_eq!(maze.open_pairs(), cells - 1);
        assert!(maze.distances().iter().all(|&d| d >= 0));
    }
}

#[test]
fn loops_keep_everything_reachable() {
    for loops in [1, 6, 18, 30] {
        for maze in all_mazes(loops) {
            let cells = maze.w() * maze.h();
            assert!(maze.open_pairs() >= cells - 1);
            assert!(maze.distances().iter().all(|&d| d >= 0));
        }
    }
}

#[test]
fn loops_add_passages_on_large_grid() {
    let tree = generate(40, 40, 18, "cycles", 0, 30).unwrap();
    let looped = generate(40, 40, 18, "cycles", 30, 30).unwrap();
    // floor(1600 * 0.3 * 0.5)
    assert_eq!(looped.open_pairs(), tree.open_pairs() + 240);
}

#[test]
fn end_is_farthest() {
    for loops in [0, 30] {
        for maze in all_mazes(loops) {
            let d = maze.distances();
            let end = maze.end();
            let end_d = d[end.y * maze.w() + end.x];
            assert!(d.iter().all(|&v| v <= end_d));
            let start = maze.start();
            assert_eq!(d[start.y * maze.w() + start.x], 0);
        }
    }
}

#[test]
fn single_cell() {
    let maze = generate(1, 1, 18, "1", 6, 30).unwrap();
    assert_eq!(maze.walls(), &[15]);
    assert_eq!(maze.start(), Pos::new(0, 0));
    assert_eq!(maze.end(), Pos::new(0, 0));
}

#[test]
fn two_cells_seed_x() {
    let maze = generate(2, 1, 18, "x", 0, 30).unwrap();
    assert_eq!(maze.open_pairs(), 1);
    assert_ne!(maze.start(), maze.end());
    let d = maze.distances();
    assert_eq!(d.iter().copied().max(), Some(1));
}

#[test]
fn straightness_changes_layout() {
    let loose = generate(60, 60, 18, "corridors", 0, 0).unwrap();
    let tight = generate(60, 60, 18, "corridors", 0, 100).unwrap();
    assert_ne!(loose.walls(), tight.walls());
    assert_eq!(loose.open_pairs(), 60 * 60 - 1);
    assert_eq!(tight.open_pairs(), 60 * 60 - 1);
}

#[test]
fn different_seeds_differ() {
    let mut layouts = Vec::new();
    for i in 0..20 {
        let maze = generate(30, 20, 18, &format!("seed-{i}"), 6, 30).unwrap();
        layouts.push(maze.walls().to_vec());
    }
    for i in 0..layouts.len() {
        for j in i + 1..layouts.len() {
            assert_ne!(layouts[i], layouts[j], "seed-{i} and seed-{j} collide");
        }
    }
}

#[test]
fn maze_carries_metadata() {
    let maze = generate(7, 9, 25, "meta", 6, 30).unwrap();
    assert_eq!(maze.format(), "maze-v1");
    assert_eq!(maze.seed(), "meta");
    assert_eq!((maze.w(), maze.h(), maze.cell_px()), (7, 9, 25));
    assert_eq!(maze.walls().len(), 63);
    assert!(maze.walls().iter().all(|&m| m <= 15));
}
