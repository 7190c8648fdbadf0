//! Viewer settings: `MAZE_*` environment variables, then `key=value`
//! command-line arguments (`w`, `h`, `cell`, `loops`, `straight`, `seed`).

use crate::maze::MazeParams;

const DEFAULT_RENDER_FPS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub params: MazeParams,
    pub render_fps: u64,
    pub plain: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            params: MazeParams::default(),
            render_fps: DEFAULT_RENDER_FPS,
            plain: false,
        }
    }
}

/// Parse `raw` as a number, floor it, clamp to `[min, max]`. A blank value
/// reads as zero; anything else that is not a finite number yields
/// `fallback`.
pub fn clamp_int(raw: &str, min: i64, max: i64, fallback: i64) -> i64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0i64.clamp(min, max);
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => (n.floor() as i64).clamp(min, max),
        _ => fallback,
    }
}

/// An empty seed falls back to `"1"`; anything else is trimmed, so a
/// whitespace-only seed becomes the empty seed.
pub fn normalize_seed(raw: &str) -> String {
    if raw.is_empty() {
        "1".to_string()
    } else {
        raw.trim().to_string()
    }
}

impl ViewerConfig {
    pub fn from_env_and_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self::from_sources(|key| std::env::var(key).ok(), args)
    }

    pub fn from_sources<F, I>(env: F, args: I) -> Self
    where
        F: Fn(&str) -> Option<String>,
        I: IntoIterator<Item = String>,
    {
        let mut cfg = Self::default();
        for (var, key) in [
            ("MAZE_W", "w"),
            ("MAZE_H", "h"),
            ("MAZE_CELL", "cell"),
            ("MAZE_LOOPS", "loops"),
            ("MAZE_STRAIGHT", "straight"),
            ("MAZE_SEED", "seed"),
        ] {
            match env(var) {
                Some(v) if !v.is_empty() => cfg.set(key, &v),
                _ => {}
            }
        }
        cfg.render_fps = env("MAZE_FPS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_RENDER_FPS);
        cfg.plain = env("MAZE_PLAIN").is_some_and(|v| v == "1");

        for arg in args {
            if arg == "--plain" {
                cfg.plain = true;
            } else if let Some((key, value)) = arg.split_once('=') {
                // Empty values leave the setting alone.
                if !value.is_empty() {
                    cfg.set(key, value);
                }
            } else {
                log::warn!("ignoring argument {:?}", arg);
            }
        }
        cfg.params = normalized(&cfg.params);
        cfg
    }

    fn set(&mut self, key: &str, value: &str) {
        let p = &mut self.params;
        match key {
            "w" => p.width = clamp_int(value, 5, 200, 30) as usize,
            "h" => p.height = clamp_int(value, 5, 200, 20) as usize,
            "cell" => p.cell_px = clamp_int(value, 4, 40, 18) as u32,
            "loops" => p.loops_percent = clamp_int(value, 0, 30, 6) as i32,
            "straight" => p.straightness = clamp_int(value, 0, 100, 30) as i32,
            "seed" => p.seed = value.to_string(),
            _ => log::warn!("unknown setting {:?}", key),
        }
    }
}

/// Re-clamp every field into the viewer's ranges.
pub fn normalized(p: &MazeParams) -> MazeParams {
    MazeParams {
        width: p.width.clamp(5, 200),
        height: p.height.clamp(5, 200),
        cell_px: p.cell_px.clamp(4, 40),
        seed: normalize_seed(&p.seed),
        loops_percent: p.loops_percent.clamp(0, 30),
        straightness: p.straightness.clamp(0, 100),
    }
}
