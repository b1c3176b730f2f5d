pub mod messages;
pub mod stdio;

pub use messages::{HostMessage, SnapshotPayload, TrackerMessage};
pub use stdio::{run_bridge, run_stdio};
