//! Block projection of a maze for character displays.
//!
//! Cell `(x, y)` lands on tile `(2x+1, 2y+1)`; the tile between two cells is
//! open when their passage is, and every corner post is a wall.

use crate::grid::Dir;
use crate::maze::Maze;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Open,
    Start,
    End,
}

pub fn tile_grid(maze: &Maze) -> Vec<Vec<Tile>> {
    let (w, h) = (maze.w(), maze.h());
    let mut grid = vec![vec![Tile::Wall; 2 * w + 1]; 2 * h + 1];

    for y in 0..h {
        for x in 0..w {
            let (gx, gy) = (2 * x + 1, 2 * y + 1);
            grid[gy][gx] = Tile::Open;
            if maze.can_move(x, y, Dir::East) {
                grid[gy][gx + 1] = Tile::Open;
            }
            if maze.can_move(x, y, Dir::South) {
                grid[gy + 1][gx] = Tile::Open;
            }
        }
    }

    let s = maze.start();
    let e = maze.end();
    grid[2 * s.y + 1][2 * s.x + 1] = Tile::Start;
    grid[2 * e.y + 1][2 * e.x + 1] = Tile::End;
    grid
}

/// Plain-text rendering, one line per tile row.
pub fn to_text(tiles: &[Vec<Tile>]) -> String {
    let mut out = String::new();
    for row in tiles {
        for tile in row {
            out.push_str(match tile {
                Tile::Wall => "██",
                Tile::Open => "  ",
                Tile::Start => "S ",
                Tile::End => "E ",
            });
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::generate;

    #[test]
    fn single_cell_is_boxed() {
        let maze = generate(1, 1, 18, "", 0, 0).unwrap();
        let tiles = tile_grid(&maze);
        assert_eq!(tiles.len(), 3);
        assert!(tiles.iter().all(|r| r.len() == 3));
        // Start and end coincide; the end marker wins.
        assert_eq!(tiles[1][1], Tile::End);
        let walls = tiles.iter().flatten().filter(|t| **t == Tile::Wall).count();
        assert_eq!(walls, 8);
    }

    #[test]
    fn open_tiles_match_passages() {
        let maze = generate(9, 7, 18, "tiles", 10, 40).unwrap();
        let tiles = tile_grid(&maze);
        assert_eq!(tiles.len(), 15);
        assert_eq!(tiles[0].len(), 19);

        let cells = 9 * 7;
        let open = tiles
            .iter()
            .flatten()
            .filter(|t| **t != Tile::Wall)
            .count();
        assert_eq!(open, cells + maze.open_pairs());

        for row in tiles.iter().step_by(2) {
            for tile in row.iter().step_by(2) {
                assert_eq!(*tile, Tile::Wall);
            }
        }
    }

    #[test]
    fn text_has_one_line_per_row() {
        let maze = generate(3, 2, 18, "txt", 0, 0).unwrap();
        let text = to_text(&tile_grid(&maze));
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains('S'));
        assert!(text.contains('E'));
    }
}
