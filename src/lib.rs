//! Deterministic maze generation.
//!
//! A seed string drives one xorshift32 stream through three passes over a
//! wall-bitmask grid: depth-first carving into a spanning tree, loop
//! injection, and a BFS that picks the cell farthest from the start as the
//! goal. The result is an immutable [`Maze`].

pub mod carve;
pub mod config;
pub mod error;
pub mod goal;
pub mod grid;
pub mod loops;
pub mod maze;
pub mod rng;
pub mod tiles;

pub use error::MazeError;
pub use grid::{Dir, Pos, WallGrid};
pub use maze::{generate, Maze, MazeParams, FORMAT_TAG};
pub use rng::MazeRng;
pub use tiles::{tile_grid, Tile};
