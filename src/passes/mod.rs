mod checkpoint;
mod error;
mod normalize;
mod types;
mod window;

pub use checkpoint::sample_checkpoints;
pub use error::PassError;
pub use normalize::normalize_events;
pub use types::{Checkpoint, CheckpointLabel, EventKind, EventMarker, ObservationSample, PassWindow};
pub use window::{build_windows, window_from_samples, TruncatedPass, WindowSet};
