use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use tokio::{
    sync::{mpsc, Mutex},
    time::{sleep, Duration},
};

use crate::{
    bridge::messages::{parse_inventory, token_amount, HostMessage, SnapshotPayload, TrackerMessage},
    jobs,
    settings::SettingsStore,
    stats::{
        actions_to_million, estimate_rates, level_info, percent_to_target, perk_odds, RateConfig,
        MILLION, TEN_MILLION,
    },
    tracker::session::{Observation, TrackingSession},
};

const NO_DATA_RETRY_MS: u64 = 3_000;
const WELCOME_TIP_DELAY_MS: u64 = 3_000;

/// Everything the overlay needs to render, recomputed per snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedState {
    pub job_label: String,
    pub job_display: String,
    pub total_exp: f64,
    pub level: u32,
    pub exp_in_level: f64,
    pub exp_to_next: f64,
    pub bonus_xp: Option<f64>,
    pub exp_per_hour: Option<i64>,
    pub exp_per_minute: Option<i64>,
    pub percent_to_million: f64,
    pub percent_to_ten_million: f64,
    pub perk_odds: Option<String>,
    pub actions_to_million: Option<String>,
    pub generated_at: DateTime<Utc>,
}

/// Events for the render collaborator.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum TrackerEvent {
    StateUpdated { state: TrackedState },
    GainDetected { amount: f64 },
}

struct TrackerState {
    session: Option<TrackingSession>,
    last_inventory: Option<serde_json::Map<String, serde_json::Value>>,
    has_welcomed: bool,
    has_received_any_data: bool,
    has_requested_once: bool,
}

impl TrackerState {
    fn new() -> Self {
        Self {
            session: None,
            last_inventory: None,
            has_welcomed: false,
            has_received_any_data: false,
            has_requested_once: false,
        }
    }
}

/// Orchestrates one snapshot ingestion end to end: job resolution, gain
/// classification, rate estimation, and outbound side effects.
#[derive(Clone)]
pub struct TrackerController {
    state: Arc<Mutex<TrackerState>>,
    outbound: mpsc::UnboundedSender<TrackerMessage>,
    events: mpsc::UnboundedSender<TrackerEvent>,
    settings: Arc<SettingsStore>,
    config: RateConfig,
}

impl TrackerController {
    pub fn new(
        outbound: mpsc::UnboundedSender<TrackerMessage>,
        events: mpsc::UnboundedSender<TrackerEvent>,
        settings: Arc<SettingsStore>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(TrackerState::new())),
            outbound,
            events,
            settings,
            config: RateConfig::default(),
        }
    }

    /// Send the startup data request and arm the one-shot no-data retry.
    pub async fn start(&self) {
        self.request_data(false, None).await;

        let controller = self.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(NO_DATA_RETRY_MS)).await;
            let received = controller.state.lock().await.has_received_any_data;
            if !received {
                info!("no snapshot within {NO_DATA_RETRY_MS}ms, retrying data request");
                controller.request_data(true, None).await;
            }
        });
    }

    pub async fn handle_message(&self, message: HostMessage, now: DateTime<Utc>) {
        match message {
            HostMessage::Data { data } => {
                self.ingest_snapshot(data, now).await;
            }
            HostMessage::Unknown => debug!("ignoring unrecognized host message"),
        }
    }

    /// Run one snapshot through the pipeline. Returns the freshly derived
    /// state, or `None` when the snapshot was irrelevant or incomplete.
    pub async fn ingest_snapshot(
        &self,
        data: SnapshotPayload,
        now: DateTime<Utc>,
    ) -> Option<TrackedState> {
        let mut state = self.state.lock().await;
        state.has_received_any_data = true;

        // Fallback precedence: payload job_name, payload job, persisted last
        // valid job, then the sentinel.
        let raw_job = data
            .job_name
            .clone()
            .or_else(|| data.job.clone())
            .or_else(|| self.settings.last_valid_job())
            .unwrap_or_else(|| "unknown".to_string());
        let job_key = jobs::resolve_job_key(&raw_job);

        let Some(descriptor) = jobs::descriptor_for(&job_key) else {
            debug!("skipping snapshot for untracked job '{raw_job}' -> '{job_key}'");
            return None;
        };

        let token_id = jobs::bonus_token_id(descriptor.remote_key);
        let inventory = match &data.inventory {
            Some(value) => match parse_inventory(value) {
                Some(map) => {
                    state.last_inventory = Some(map.clone());
                    Some(map)
                }
                // Present but unparseable: no bonus this tick.
                None => None,
            },
            None => state.last_inventory.clone(),
        };
        let bonus_xp = inventory
            .as_ref()
            .and_then(|inv| token_amount(inv, &token_id));

        if !state.has_welcomed {
            if let Some(name) = data.name.as_deref().filter(|name| !name.is_empty()) {
                state.has_welcomed = true;
                self.send_welcome(name);
            }
        }

        let switched = state
            .session
            .as_ref()
            .map_or(true, |session| session.job_key != job_key);
        if switched {
            info!("now tracking '{}' ({})", job_key, descriptor.label);
            state.session = Some(TrackingSession::new(job_key.clone(), raw_job.clone()));
            if let Err(err) = self.settings.set_last_valid_job(&raw_job) {
                warn!("failed to persist last valid job: {err:#}");
            }
            self.request_data_locked(&mut state, true, Some(&job_key));
        }

        let exp = data.exp_value(descriptor.remote_key)?;

        let config = self.config.clone();
        let session = state.session.as_mut()?;

        let observation = session.observe(exp, now, config.boundary_backdate_ms);
        if let Observation::Gain { amount } = observation {
            debug!("gain of {amount} XP for '{}'", session.job_key);
            let _ = self.events.send(TrackerEvent::GainDetected { amount });
        }

        let rates = estimate_rates(&session.gain_log, session.has_first_gain, now, &config);
        let level = level_info(exp);

        let tracked = TrackedState {
            job_label: descriptor.label.to_string(),
            job_display: session.job_display.clone(),
            total_exp: exp,
            level: level.level,
            exp_in_level: level.exp_in_level,
            exp_to_next: level.exp_to_next(),
            bonus_xp,
            exp_per_hour: rates.per_hour,
            exp_per_minute: rates.per_minute,
            percent_to_million: percent_to_target(exp, MILLION),
            percent_to_ten_million: percent_to_target(exp, TEN_MILLION),
            perk_odds: perk_odds(exp, &session.gain_log).map(|odds| odds.to_string()),
            actions_to_million: actions_to_million(exp, &session.gain_log)
                .map(|actions| actions.to_string()),
            generated_at: now,
        };

        let _ = self.events.send(TrackerEvent::StateUpdated { state: tracked.clone() });
        Some(tracked)
    }

    /// User-triggered reset: drop the gain history but keep tracking the
    /// same job from its current exp value.
    pub async fn reset_tracking(&self) {
        let mut state = self.state.lock().await;
        if let Some(session) = state.session.as_mut() {
            info!("resetting exp tracking for '{}'", session.job_key);
            session.reset_tracking();
        }
    }

    /// Ask the host for data. Guarded to one request per process unless
    /// forced; send failure falls back to the broad legacy request.
    pub async fn request_data(&self, force: bool, job_key: Option<&str>) {
        let mut state = self.state.lock().await;
        self.request_data_locked(&mut state, force, job_key);
    }

    fn request_data_locked(&self, state: &mut TrackerState, force: bool, job_key: Option<&str>) {
        if state.has_requested_once && !force {
            return;
        }
        state.has_requested_once = true;

        let keys = match job_key {
            Some(key) => jobs::optimized_keys_for(key),
            None => jobs::all_required_keys(),
        };
        if self.outbound.send(TrackerMessage::GetNamedData { keys }).is_err() {
            warn!("targeted data request failed, falling back to broad request");
            let _ = self.outbound.send(TrackerMessage::GetData);
        }
    }

    /// Forward the overlay's pin/escape trigger to the host.
    pub fn pin(&self) {
        let _ = self.outbound.send(TrackerMessage::Pin);
    }

    fn send_welcome(&self, name: &str) {
        self.send_notification(format!("Welcome {name}"));

        let outbound = self.outbound.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(WELCOME_TIP_DELAY_MS)).await;
            let _ = outbound.send(TrackerMessage::Notification {
                text: tracker_text(
                    "If the XP/hr starts to get inaccurate, open the settings and click ~r~\"Reset EXP Tracking\"~s~",
                ),
            });
        });
    }

    fn send_notification(&self, message: String) {
        let _ = self.outbound.send(TrackerMessage::Notification {
            text: tracker_text(&message),
        });
    }
}

fn tracker_text(message: &str) -> String {
    format!("~g~[XP Tracker]~s~ {message}")
}
