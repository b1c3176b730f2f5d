//! Milestone projections toward the 1M and 10M XP marks.
//!
//! Everything here is derived from the last two retained log entries: the
//! delta between them stands in for "XP per action" when projecting how many
//! more actions the 1M milestone needs.

use std::fmt;

use crate::tracker::session::GainLogEntry;

pub const MILLION: f64 = 1_000_000.0;
pub const TEN_MILLION: f64 = 10_000_000.0;

/// Odds of the next action landing the guaranteed-bonus milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerkOdds {
    Guaranteed,
    OneIn(i64),
}

impl fmt::Display for PerkOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerkOdds::Guaranteed => write!(f, "Guaranteed"),
            PerkOdds::OneIn(n) => write!(f, "1 in {n}"),
        }
    }
}

/// Actions remaining until the 1M milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionsToMillion {
    Complete,
    Needed(i64),
}

impl fmt::Display for ActionsToMillion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionsToMillion::Complete => write!(f, "Complete"),
            ActionsToMillion::Needed(n) => write!(f, "{n}"),
        }
    }
}

/// XP earned between the last two retained entries, when positive.
fn last_earned(log: &[GainLogEntry]) -> Option<(f64, f64)> {
    if log.len() < 2 {
        return None;
    }
    let last = log[log.len() - 1];
    let prev = log[log.len() - 2];
    let earned = last.exp - prev.exp;
    (earned > 0.0).then_some((last.exp, earned))
}

/// Odds of reaching 1M total, phrased against the last observed gain size.
pub fn perk_odds(current_exp: f64, log: &[GainLogEntry]) -> Option<PerkOdds> {
    if current_exp >= MILLION {
        return Some(PerkOdds::Guaranteed);
    }
    let (last_exp, earned) = last_earned(log)?;
    let chance = (MILLION - last_exp) / earned;
    if chance <= 1.0 {
        Some(PerkOdds::Guaranteed)
    } else {
        Some(PerkOdds::OneIn(chance.round() as i64))
    }
}

/// Actions of the last observed size still needed to reach 1M total.
pub fn actions_to_million(current_exp: f64, log: &[GainLogEntry]) -> Option<ActionsToMillion> {
    if current_exp >= MILLION {
        return Some(ActionsToMillion::Complete);
    }
    let (_, earned) = last_earned(log)?;
    let needed = ((MILLION - current_exp) / earned).ceil() as i64;
    Some(ActionsToMillion::Needed(needed))
}

/// Percent progress toward a target, clamped to [0, 100] at two decimals.
pub fn percent_to_target(current_exp: f64, target: f64) -> f64 {
    let pct = ((current_exp / target) * 100.0).clamp(0.0, 100.0);
    (pct * 100.0).round() / 100.0
}
