/// Tunable constants for rate estimation.
#[derive(Debug, Clone)]
pub struct RateConfig {
    /// Trailing window used for the responsive "recent" rate.
    pub recent_window_ms: i64,

    /// How far before "now" the synthesized session-start boundary entry is
    /// dated when the first gain lands. Gives the estimator a second point
    /// immediately instead of waiting for another snapshot.
    pub boundary_backdate_ms: i64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            recent_window_ms: 10 * 60 * 1000,
            boundary_backdate_ms: 5_000,
        }
    }
}
