pub mod bridge;
pub mod jobs;
pub mod settings;
pub mod stats;
pub mod tracker;

pub use bridge::{HostMessage, SnapshotPayload, TrackerMessage};
pub use settings::SettingsStore;
pub use stats::{RateConfig, RateEstimate};
pub use tracker::{TrackedState, TrackerController, TrackerEvent, TrackingSession};
