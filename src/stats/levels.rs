//! Level math.
//!
//! Levels are cumulative: the cap for leaving level `n` is `(n + 1) * 5`,
//! so reaching higher levels takes progressively more XP.

/// Where a cumulative XP total falls in the level curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelInfo {
    pub level: u32,
    /// XP already earned inside the current level.
    pub exp_in_level: f64,
    /// Total XP the current level requires.
    pub exp_for_next: f64,
}

impl LevelInfo {
    /// XP still needed to reach the next level, rounded for display.
    pub fn exp_to_next(&self) -> f64 {
        (self.exp_for_next - self.exp_in_level).round()
    }
}

pub fn level_info(exp: f64) -> LevelInfo {
    let mut remaining = exp;
    let mut level: u32 = 0;
    let mut cap = 5.0;
    while remaining >= cap {
        remaining -= cap;
        level += 1;
        cap = f64::from(level + 1) * 5.0;
    }
    LevelInfo {
        level,
        exp_in_level: remaining,
        exp_for_next: cap,
    }
}
