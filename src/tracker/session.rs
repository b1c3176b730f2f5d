use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One retained XP observation. Entries are appended in timestamp order and
/// `exp` never decreases across retained entries; decreasing snapshots are
/// classified as stale before they reach the log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GainLogEntry {
    pub time: DateTime<Utc>,
    pub exp: f64,
}

/// How a snapshot's exp value relates to the session so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Observation {
    /// Strict increase over the last seen value; the log was extended.
    Gain { amount: f64 },
    /// Equal or decreasing value; nothing logged, stats recompute as-is.
    Stale,
    /// Very first value of the session; nothing to compare against yet.
    First,
}

/// Mutable state for one continuously-tracked job. Switching jobs discards
/// the whole session; there is never more than one live at a time.
#[derive(Debug, Clone)]
pub struct TrackingSession {
    pub id: String,
    /// Canonical key of the tracked job.
    pub job_key: String,
    /// Job name exactly as the host sent it, for display.
    pub job_display: String,
    pub last_exp: Option<f64>,
    pub initial_exp: Option<f64>,
    /// Whether the exp value has moved at all since the session started,
    /// in either direction.
    pub has_first_gain: bool,
    pub gain_log: Vec<GainLogEntry>,
}

impl TrackingSession {
    pub fn new(job_key: String, job_display: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            job_key,
            job_display,
            last_exp: None,
            initial_exp: None,
            has_first_gain: false,
            gain_log: Vec::new(),
        }
    }

    /// Feed one exp observation for the tracked job.
    ///
    /// The first real gain also synthesizes a boundary entry dated
    /// `boundary_backdate_ms` before `now`, carrying the session's initial
    /// value, so the estimator has two points immediately.
    pub fn observe(
        &mut self,
        exp: f64,
        now: DateTime<Utc>,
        boundary_backdate_ms: i64,
    ) -> Observation {
        if self.initial_exp.is_none() {
            self.initial_exp = Some(exp);
        }
        if !self.has_first_gain && self.initial_exp != Some(exp) {
            self.has_first_gain = true;
        }

        let outcome = match self.last_exp {
            Some(last) if exp > last => {
                let amount = exp - last;
                self.gain_log.push(GainLogEntry { time: now, exp });
                if self.gain_log.len() == 1 {
                    let boundary_exp = self.initial_exp.unwrap_or(exp - amount);
                    self.gain_log.insert(
                        0,
                        GainLogEntry {
                            time: now - Duration::milliseconds(boundary_backdate_ms),
                            exp: boundary_exp,
                        },
                    );
                }
                Observation::Gain { amount }
            }
            Some(_) => Observation::Stale,
            None => Observation::First,
        };

        self.last_exp = Some(exp);
        outcome
    }

    /// User-triggered reset: empty the log and re-pin the starting value to
    /// wherever the exp currently sits. Job identity and last seen value
    /// survive, so the next gain is still measured against reality.
    pub fn reset_tracking(&mut self) {
        self.gain_log.clear();
        self.has_first_gain = false;
        self.initial_exp = self.last_exp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn session() -> TrackingSession {
        TrackingSession::new("trucker".into(), "Trucker".into())
    }

    #[test]
    fn first_observation_is_never_a_gain() {
        let mut s = session();
        assert_eq!(s.observe(100.0, at(0), 5_000), Observation::First);
        assert_eq!(s.initial_exp, Some(100.0));
        assert_eq!(s.last_exp, Some(100.0));
        assert!(!s.has_first_gain);
        assert!(s.gain_log.is_empty());
    }

    #[test]
    fn first_gain_synthesizes_backdated_boundary() {
        let mut s = session();
        s.observe(100.0, at(0), 5_000);
        let obs = s.observe(130.0, at(60), 5_000);
        assert_eq!(obs, Observation::Gain { amount: 30.0 });
        assert!(s.has_first_gain);

        assert_eq!(s.gain_log.len(), 2);
        assert_eq!(s.gain_log[0].exp, 100.0);
        assert_eq!(s.gain_log[0].time, at(60) - Duration::milliseconds(5_000));
        assert_eq!(s.gain_log[1].exp, 130.0);
        assert_eq!(s.gain_log[1].time, at(60));
    }

    #[test]
    fn later_gains_append_without_boundary() {
        let mut s = session();
        s.observe(100.0, at(0), 5_000);
        s.observe(130.0, at(60), 5_000);
        s.observe(150.0, at(120), 5_000);
        assert_eq!(s.gain_log.len(), 3);
        assert_eq!(s.gain_log[2].exp, 150.0);
    }

    #[test]
    fn equal_or_decreasing_values_never_touch_the_log() {
        let mut s = session();
        s.observe(100.0, at(0), 5_000);
        s.observe(130.0, at(60), 5_000);

        assert_eq!(s.observe(130.0, at(90), 5_000), Observation::Stale);
        assert_eq!(s.observe(90.0, at(120), 5_000), Observation::Stale);
        assert_eq!(s.gain_log.len(), 2);

        // last_exp tracked the decrease, so climbing back to a value we've
        // already seen counts as a gain again under the strictly-greater rule.
        assert_eq!(s.last_exp, Some(90.0));
        assert_eq!(s.observe(130.0, at(150), 5_000), Observation::Gain { amount: 40.0 });
    }

    #[test]
    fn first_gain_flag_flips_on_any_movement() {
        let mut s = session();
        s.observe(100.0, at(0), 5_000);
        // A decrease still counts as "the session has moved".
        assert_eq!(s.observe(80.0, at(30), 5_000), Observation::Stale);
        assert!(s.has_first_gain);
    }

    #[test]
    fn reset_pins_initial_to_current_and_keeps_identity() {
        let mut s = session();
        s.observe(100.0, at(0), 5_000);
        s.observe(130.0, at(60), 5_000);
        let id = s.id.clone();

        s.reset_tracking();
        assert!(s.gain_log.is_empty());
        assert!(!s.has_first_gain);
        assert_eq!(s.initial_exp, Some(130.0));
        assert_eq!(s.last_exp, Some(130.0));
        assert_eq!(s.job_key, "trucker");
        assert_eq!(s.id, id);
    }
}
