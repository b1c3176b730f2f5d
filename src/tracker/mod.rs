pub mod controller;
pub mod session;

pub use controller::{TrackedState, TrackerController, TrackerEvent};
pub use session::{GainLogEntry, Observation, TrackingSession};
