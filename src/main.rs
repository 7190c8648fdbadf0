use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use log::{debug, info};
use rand::Rng;
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

use mazegen::config::{normalized, ViewerConfig};
use mazegen::tiles::to_text;
use mazegen::{tile_grid, Maze, MazeError, MazeParams, Tile};

const CELL_W: usize = 2;
const RANDOM_SEED_MAX: u32 = 1_000_000_000;

struct View {
    params: MazeParams,
    maze: Maze,
    tiles: Vec<Vec<Tile>>,
    depth: i32,
}

impl View {
    fn new(params: MazeParams) -> io::Result<Self> {
        let params = normalized(&params);
        let maze = params.generate().map_err(invalid_input)?;
        let tiles = tile_grid(&maze);
        let end = maze.end();
        let depth = maze.distances()[end.y * maze.w() + end.x];
        info!(
            "generated {}x{} maze, seed {:?}, end at distance {}",
            maze.w(),
            maze.h(),
            maze.seed(),
            depth
        );
        Ok(Self {
            params,
            maze,
            tiles,
            depth,
        })
    }

    fn regenerate(&mut self, params: MazeParams) -> io::Result<()> {
        *self = View::new(params)?;
        Ok(())
    }

    fn width(&self) -> usize {
        self.tiles.first().map_or(0, Vec::len)
    }

    fn height(&self) -> usize {
        self.tiles.len()
    }

    /// Terminal columns and rows the maze needs, HUD line included.
    fn footprint(&self) -> (u16, u16) {
        let cols = (self.width() * CELL_W).min(u16::MAX as usize) as u16;
        let rows = (self.height() + 1).min(u16::MAX as usize) as u16;
        (cols, rows)
    }

    fn place(&self, term_w: u16, term_h: u16) -> Placement {
        let (cols, rows) = self.footprint();
        if term_w < cols || term_h < rows {
            return Placement::TooSmall { cols, rows };
        }
        Placement::Fits {
            x: (term_w - cols) / 2,
            y: (term_h - rows) / 2 + 1,
        }
    }

    fn hud(&self) -> String {
        format!(
            "{}x{}  seed: {}  loops: {}%  straight: {}%  path: {}  (r/g/[/]/-/=/w/W/h/H, q to quit)",
            self.maze.w(),
            self.maze.h(),
            self.maze.seed(),
            self.params.loops_percent,
            self.params.straightness,
            self.depth
        )
    }
}

fn invalid_input(err: MazeError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Top-left corner of the maze; the HUD sits on the row above.
    Fits { x: u16, y: u16 },
    TooSmall { cols: u16, rows: u16 },
}

/// Remembers what is on screen so only changed rows are rewritten.
struct Renderer {
    rows: Vec<Vec<Tile>>,
    hud: String,
    placement: Option<Placement>,
}

impl Renderer {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            hud: String::new(),
            placement: None,
        }
    }

    fn invalidate(&mut self) {
        self.placement = None;
    }
}

fn main() -> io::Result<()> {
    env_logger::init();
    let cfg = ViewerConfig::from_env_and_args(std::env::args().skip(1));
    debug!("viewer config: {:?}", cfg);

    if cfg.plain {
        let view = View::new(cfg.params)?;
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", view.hud())?;
        write!(stdout, "{}", to_text(&view.tiles))?;
        return stdout.flush();
    }

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &cfg);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout, cfg: &ViewerConfig) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut view = View::new(cfg.params.clone())?;
    let mut renderer = Renderer::new();
    let frame_time = Duration::from_micros(1_000_000 / cfg.render_fps.max(1));

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                continue;
            }
            let mut next = view.params.clone();
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('r') => {
                    next.seed = rng.gen_range(0..RANDOM_SEED_MAX).to_string();
                }
                KeyCode::Char('g') => {}
                KeyCode::Char('[') => next.loops_percent -= 1,
                KeyCode::Char(']') => next.loops_percent += 1,
                KeyCode::Char('-') => next.straightness -= 5,
                KeyCode::Char('=') => next.straightness += 5,
                KeyCode::Char('w') => next.width = next.width.saturating_sub(1),
                KeyCode::Char('W') => next.width += 1,
                KeyCode::Char('h') => next.height = next.height.saturating_sub(1),
                KeyCode::Char('H') => next.height += 1,
                _ => continue,
            }
            view.regenerate(next)?;
            renderer.invalidate();
        }

        render(stdout, &view, &mut renderer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn render(stdout: &mut Stdout, view: &View, renderer: &mut Renderer) -> io::Result<()> {
    let (term_w, term_h) = terminal::size()?;
    let placement = view.place(term_w, term_h);
    let full = renderer.placement != Some(placement);
    if full {
        stdout.queue(Clear(ClearType::All))?;
        renderer.placement = Some(placement);
        renderer.rows.clear();
        renderer.hud.clear();
    }

    let (ox, oy) = match placement {
        Placement::TooSmall { cols, rows } => {
            if full {
                let msg = format!(
                    "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                    cols, rows, term_w, term_h
                );
                stdout.queue(MoveTo(0, 0))?;
                stdout.queue(Print(fit_width(&msg, term_w as usize)))?;
            }
            return stdout.flush();
        }
        Placement::Fits { x, y } => (x, y),
    };

    let hud = fit_width(&view.hud(), term_w.saturating_sub(ox) as usize);
    if hud != renderer.hud {
        stdout.queue(MoveTo(ox, oy - 1))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.hud = hud;
    }

    renderer.rows.resize(view.height(), Vec::new());
    for (y, (row, shown)) in view.tiles.iter().zip(renderer.rows.iter_mut()).enumerate() {
        if row == &*shown {
            continue;
        }
        stdout.queue(MoveTo(ox, oy + y as u16))?;
        for (color, text) in row_runs(row) {
            stdout.queue(SetForegroundColor(color))?;
            stdout.queue(Print(text))?;
        }
        stdout.queue(ResetColor)?;
        shown.clone_from(row);
    }

    stdout.flush()
}

fn glyph(tile: Tile) -> (&'static str, Color) {
    match tile {
        Tile::Wall => ("██", Color::Blue),
        Tile::Open => ("", Color::Reset),
        Tile::Start => ("●", Color::Green),
        Tile::End => ("●", Color::Red),
    }
}

/// Collapse a tile row into same-colour runs, each tile padded to `CELL_W`
/// columns.
fn row_runs(row: &[Tile]) -> Vec<(Color, String)> {
    let mut runs: Vec<(Color, String)> = Vec::new();
    for &tile in row {
        let (text, color) = glyph(tile);
        let pad = CELL_W.saturating_sub(UnicodeWidthStr::width(text));
        match runs.last_mut() {
            Some((c, run)) if *c == color => {
                run.push_str(text);
                run.extend(std::iter::repeat(' ').take(pad));
            }
            _ => {
                let mut run = text.to_string();
                run.extend(std::iter::repeat(' ').take(pad));
                runs.push((color, run));
            }
        }
    }
    runs
}

/// Longest prefix of `text` that fits in `cols` terminal columns.
fn fit_width(text: &str, cols: usize) -> String {
    if UnicodeWidthStr::width(text) <= cols {
        return text.to_string();
    }
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > cols {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
