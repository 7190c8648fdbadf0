// Wall bits per cell.
// 1=north, 2=east, 4=south, 8=west. A set bit means the wall is present.
pub const WALL_N: u8 = 1;
pub const WALL_E: u8 = 2;
pub const WALL_S: u8 = 4;
pub const WALL_W: u8 = 8;
pub const ALL_WALLS: u8 = WALL_N | WALL_E | WALL_S | WALL_W;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    North,
    East,
    South,
    West,
}

impl Dir {
    /// Visit order used everywhere a neighbourhood is scanned.
    pub const ALL: [Dir; 4] = [Dir::North, Dir::East, Dir::South, Dir::West];

    pub fn bit(self) -> u8 {
        match self {
            Dir::North => WALL_N,
            Dir::East => WALL_E,
            Dir::South => WALL_S,
            Dir::West => WALL_W,
        }
    }

    pub fn delta(self) -> (i64, i64) {
        match self {
            Dir::North => (0, -1),
            Dir::East => (1, 0),
            Dir::South => (0, 1),
            Dir::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::North => Dir::South,
            Dir::East => Dir::West,
            Dir::South => Dir::North,
            Dir::West => Dir::East,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Adjacent coordinate in `dir`. No bounds check; may be negative.
pub fn neighbor_of(x: i64, y: i64, dir: Dir) -> (i64, i64) {
    let (dx, dy) = dir.delta();
    (x + dx, y + dy)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallGrid {
    w: usize,
    h: usize,
    cells: Vec<u8>,
}

impl WallGrid {
    /// Every cell starts fully walled.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            cells: vec![ALL_WALLS; w * h],
        }
    }

    pub fn w(&self) -> usize {
        self.w
    }

    pub fn h(&self) -> usize {
        self.h
    }

    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h
    }

    /// In-bounds neighbour of `pos` in `dir`, if any.
    pub fn step(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (nx, ny) = neighbor_of(pos.x as i64, pos.y as i64, dir);
        if self.in_bounds(nx, ny) {
            Some(Pos::new(nx as usize, ny as usize))
        } else {
            None
        }
    }

    pub fn walls(&self, x: usize, y: usize) -> u8 {
        self.cells[self.idx(x, y)]
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<u8> {
        self.cells
    }

    /// Passage toward `dir` is open. Caller checks bounds first.
    pub fn can_move(&self, x: usize, y: usize, dir: Dir) -> bool {
        self.walls(x, y) & dir.bit() == 0
    }

    // One side only; `carve` keeps the pair consistent.
    fn open_passage(&mut self, x: usize, y: usize, dir: Dir) {
        let i = self.idx(x, y);
        self.cells[i] &= !dir.bit();
    }

    /// Remove the wall between `pos` and its neighbour in `dir`, on both sides.
    /// Returns the neighbour, or `None` (and does nothing) if it is off-grid.
    pub fn carve(&mut self, pos: Pos, dir: Dir) -> Option<Pos> {
        let next = self.step(pos, dir)?;
        self.open_passage(pos.x, pos.y, dir);
        self.open_passage(next.x, next.y, dir.opposite());
        Some(next)
    }

    /// Number of open passages, each pair counted once.
    pub fn open_pairs(&self) -> usize {
        let mut n = 0;
        for y in 0..self.h {
            for x in 0..self.w {
                if x + 1 < self.w && self.can_move(x, y, Dir::East) {
                    n += 1;
                }
                if y + 1 < self.h && self.can_move(x, y, Dir::South) {
                    n += 1;
                }
            }
        }
        n
    }

    /// Every open side has a matching open side on its neighbour, and no
    /// passage leads off the grid.
    pub fn is_symmetric(&self) -> bool {
        for y in 0..self.h {
            for x in 0..self.w {
                let pos = Pos::new(x, y);
                for dir in Dir::ALL {
                    let open = self.can_move(x, y, dir);
                    match self.step(pos, dir) {
                        Some(n) => {
                            if open != self.can_move(n.x, n.y, dir.opposite()) {
                                return false;
                            }
                        }
                        None => {
                            if open {
                                return false;
                            }
                        }
                    }
                }
            }
        }
        true
    }
}
