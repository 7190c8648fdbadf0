use log::debug;

use crate::carve::carve_spanning_tree;
use crate::error::MazeError;
use crate::goal::{distances, farthest_cell};
use crate::grid::{neighbor_of, Dir, Pos, WallGrid, ALL_WALLS};
use crate::loops::{inject_loops, MAX_LOOPS_PERCENT};
use crate::rng::MazeRng;

pub const FORMAT_TAG: &str = "maze-v1";

const MAX_STRAIGHTNESS: i32 = 100;

/// A finished maze. Immutable once returned from [`generate`]; a
/// deserialized maze is checked against the same invariants first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMaze"))]
pub struct Maze {
    format: String,
    seed: String,
    w: usize,
    h: usize,
    #[cfg_attr(feature = "serde", serde(rename = "cellPx"))]
    cell_px: u32,
    start: Pos,
    end: Pos,
    walls: Vec<u8>,
}

impl Maze {
    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn w(&self) -> usize {
        self.w
    }

    pub fn h(&self) -> usize {
        self.h
    }

    pub fn cell_px(&self) -> u32 {
        self.cell_px
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn end(&self) -> Pos {
        self.end
    }

    /// Row-major `w*h` wall masks (N=1, E=2, S=4, W=8; set = wall).
    pub fn walls(&self) -> &[u8] {
        &self.walls
    }

    pub fn cell_walls(&self, x: usize, y: usize) -> u8 {
        self.walls[y * self.w + x]
    }

    pub fn can_move(&self, x: usize, y: usize, dir: Dir) -> bool {
        self.cell_walls(x, y) & dir.bit() == 0
    }

    fn grid(&self) -> WallGrid {
        let mut grid = WallGrid::new(self.w, self.h);
        for y in 0..self.h {
            for x in 0..self.w {
                let pos = Pos::new(x, y);
                for dir in [Dir::East, Dir::South] {
                    if self.can_move(x, y, dir) {
                        grid.carve(pos, dir);
                    }
                }
            }
        }
        grid
    }

    /// BFS distances from `start`, row-major, `-1` if unreachable.
    pub fn distances(&self) -> Vec<i32> {
        distances(&self.grid(), self.start)
    }

    pub fn open_pairs(&self) -> usize {
        self.grid().open_pairs()
    }

    fn validate(&self) -> Result<(), MazeError> {
        if self.format != FORMAT_TAG {
            return Err(MazeError::UnknownFormat(self.format.clone()));
        }
        check_dims(self.w, self.h)?;
        let expected = self.w * self.h;
        if self.walls.len() != expected {
            return Err(MazeError::WallCount {
                expected,
                actual: self.walls.len(),
            });
        }
        if let Some((index, &mask)) = self.walls.iter().enumerate().find(|&(_, &m)| m > ALL_WALLS) {
            return Err(MazeError::InvalidMask { index, mask });
        }
        for (which, pos) in [("start", self.start), ("end", self.end)] {
            if pos.x >= self.w || pos.y >= self.h {
                return Err(MazeError::OutOfBounds {
                    which,
                    x: pos.x,
                    y: pos.y,
                });
            }
        }
        for y in 0..self.h {
            for x in 0..self.w {
                for dir in Dir::ALL {
                    let open = self.can_move(x, y, dir);
                    let (nx, ny) = neighbor_of(x as i64, y as i64, dir);
                    let inside = nx >= 0 && ny >= 0 && (nx as usize) < self.w && (ny as usize) < self.h;
                    let mirrored = inside && self.can_move(nx as usize, ny as usize, dir.opposite());
                    if open != mirrored {
                        return Err(MazeError::AsymmetricWalls { x, y });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMaze {
    format: String,
    seed: String,
    w: usize,
    h: usize,
    #[serde(rename = "cellPx")]
    cell_px: u32,
    start: Pos,
    end: Pos,
    walls: Vec<u8>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMaze> for Maze {
    type Error = MazeError;

    fn try_from(raw: RawMaze) -> Result<Self, Self::Error> {
        let maze = Maze {
            format: raw.format,
            seed: raw.seed,
            w: raw.w,
            h: raw.h,
            cell_px: raw.cell_px,
            start: raw.start,
            end: raw.end,
            walls: raw.walls,
        };
        maze.validate()?;
        Ok(maze)
    }
}

fn check_dims(w: usize, h: usize) -> Result<(), MazeError> {
    let fits = u32::try_from(w).is_ok() && u32::try_from(h).is_ok() && w.checked_mul(h).is_some();
    if w == 0 || h == 0 || !fits {
        return Err(MazeError::InvalidDimensions { w, h });
    }
    Ok(())
}

/// Generation inputs. `loops_percent` clamps to `[0, 30]` and
/// `straightness` to `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeParams {
    pub width: usize,
    pub height: usize,
    pub cell_px: u32,
    pub seed: String,
    pub loops_percent: i32,
    pub straightness: i32,
}

impl Default for MazeParams {
    fn default() -> Self {
        Self {
            width: 30,
            height: 20,
            cell_px: 18,
            seed: "1".to_string(),
            loops_percent: 6,
            straightness: 30,
        }
    }
}

impl MazeParams {
    pub fn generate(&self) -> Result<Maze, MazeError> {
        let (w, h) = (self.width, self.height);
        check_dims(w, h)?;
        let loops_percent = self.loops_percent.clamp(0, MAX_LOOPS_PERCENT as i32) as u32;
        let straightness = self.straightness.clamp(0, MAX_STRAIGHTNESS) as u32;

        let mut rng = MazeRng::new(&self.seed);
        let mut grid = WallGrid::new(w, h);
        let start = carve_spanning_tree(&mut grid, &mut rng, straightness);
        inject_loops(&mut grid, &mut rng, loops_percent);
        let (end, depth) = farthest_cell(&grid, start);
        debug!(
            "maze {}x{} seed={:?}: start ({}, {}) end ({}, {}) at distance {}",
            w, h, self.seed, start.x, start.y, end.x, end.y, depth
        );

        Ok(Maze {
            format: FORMAT_TAG.to_string(),
            seed: self.seed.clone(),
            w,
            h,
            cell_px: self.cell_px,
            start,
            end,
            walls: grid.into_cells(),
        })
    }
}

/// Build a maze: carve a spanning tree, add loops, pick the farthest cell
/// from the start as the end.
pub fn generate(
    width: usize,
    height: usize,
    cell_px: u32,
    seed: &str,
    loops_percent: i32,
    straightness: i32,
) -> Result<Maze, MazeError> {
    MazeParams {
        width,
        height,
        cell_px,
        seed: seed.to_string(),
        loops_percent,
        straightness,
    }
    .generate()
}
