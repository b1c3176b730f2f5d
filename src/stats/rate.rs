//! Blended XP-per-hour estimation.
//!
//! Two rates are computed over the gain log: the session rate (whole log)
//! and the recent rate (trailing window). Early in a session the session
//! rate dominates the blend; once the session outlives the window the
//! estimate converges onto the trailing-window rate, so it follows activity
//! changes without letting a single early event whip the number around.

use chrono::{DateTime, Utc};

use crate::stats::config::RateConfig;
use crate::tracker::session::GainLogEntry;

const MS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateEstimate {
    pub per_hour: Option<i64>,
    pub per_minute: Option<i64>,
}

impl RateEstimate {
    pub fn empty() -> Self {
        Self { per_hour: None, per_minute: None }
    }
}

/// Estimate XP/hour and XP/minute from the gain log.
///
/// Needs at least two retained entries and at least one observed movement in
/// the session; otherwise both rates are `None`.
pub fn estimate_rates(
    log: &[GainLogEntry],
    has_first_gain: bool,
    now: DateTime<Utc>,
    config: &RateConfig,
) -> RateEstimate {
    let per_hour = exp_per_hour(log, has_first_gain, now, config);
    let per_minute = per_hour.map(|hourly| (hourly as f64 / 60.0).round() as i64);
    RateEstimate { per_hour, per_minute }
}

fn exp_per_hour(
    log: &[GainLogEntry],
    has_first_gain: bool,
    now: DateTime<Utc>,
    config: &RateConfig,
) -> Option<i64> {
    if !has_first_gain || log.len() < 2 {
        return None;
    }

    let first = log[0];
    let last = log[log.len() - 1];
    let session_duration_ms = (last.time - first.time).num_milliseconds() as f64;
    let session_xp = last.exp - first.exp;
    let session_hours = session_duration_ms / MS_PER_HOUR;
    let session_rate = if session_hours > 0.0 { session_xp / session_hours } else { 0.0 };

    let recent: Vec<&GainLogEntry> = log
        .iter()
        .filter(|entry| (now - entry.time).num_milliseconds() <= config.recent_window_ms)
        .collect();
    if recent.len() < 2 {
        return Some(session_rate.round() as i64);
    }

    let recent_first = recent[0];
    let recent_last = recent[recent.len() - 1];
    let recent_hours = (recent_last.time - recent_first.time).num_milliseconds() as f64 / MS_PER_HOUR;
    let recent_rate = if recent_hours > 0.0 {
        (recent_last.exp - recent_first.exp) / recent_hours
    } else {
        0.0
    };

    let session_weight = (session_duration_ms / config.recent_window_ms as f64).min(1.0);
    let live_weight = 1.0 - session_weight;
    Some((session_rate * session_weight + recent_rate * live_weight).round() as i64)
}
