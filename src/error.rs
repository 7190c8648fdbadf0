use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Width or height is zero, does not fit in 32 bits, or `w*h` overflows.
    #[error("maze dimensions must be positive and addressable, got {w}x{h}")]
    InvalidDimensions { w: usize, h: usize },

    #[error("unknown maze format {0:?}")]
    UnknownFormat(String),

    /// The wall array is not one mask per cell.
    #[error("expected {expected} wall masks, got {actual}")]
    WallCount { expected: usize, actual: usize },

    #[error("wall mask {mask} at cell {index} uses bits beyond N|E|S|W")]
    InvalidMask { index: usize, mask: u8 },

    #[error("{which} cell ({x}, {y}) lies outside the grid")]
    OutOfBounds { which: &'static str, x: usize, y: usize },

    /// A passage is open on one side only, or leads off the grid.
    #[error("passage at ({x}, {y}) is not mirrored by its neighbour")]
    AsymmetricWalls { x: usize, y: usize },
}
