//! Seeded xorshift32 stream.
//!
//! Not cryptographically secure. Every draw made during generation goes
//! through one `MazeRng`, so the same seed string always yields the same maze.

const FNV_OFFSET: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// FNV-1a (32-bit) over the UTF-16 code units of `seed`.
pub fn hash_seed(seed: &str) -> u32 {
    let mut h = FNV_OFFSET;
    for unit in seed.encode_utf16() {
        h ^= u32::from(unit);
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

#[derive(Debug, Clone)]
pub struct MazeRng {
    state: u32,
}

impl MazeRng {
    pub fn new(seed: &str) -> Self {
        Self::from_state(hash_seed(seed))
    }

    pub fn from_state(state: u32) -> Self {
        // xorshift never leaves zero.
        let state = if state == 0 { 1 } else { state };
        Self { state }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 17;
        s ^= s << 5;
        self.state = s;
        s
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn float01(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// `min + next_u32() % (max_exclusive - min)`.
    #[inline]
    pub fn int_range(&mut self, min: u32, max_exclusive: u32) -> u32 {
        debug_assert!(max_exclusive > min, "empty range {min}..{max_exclusive}");
        min + self.next_u32() % (max_exclusive - min)
    }
}
