use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::PassError;

/// Horizon-crossing marker kind, as reported by a geometry provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum EventKind {
    Rise,
    Culmination,
    Set,
}

/// One event in the provider's chronological stream. Azimuth and elevation
/// are carried when the provider knows them at the crossing.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EventMarker {
    pub kind: EventKind,
    pub instant: DateTime<Utc>,
    pub azimuth_deg: Option<f64>,
    pub elevation_deg: Option<f64>,
}

/// One point on the object's topocentric trace.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ObservationSample {
    pub instant: DateTime<Utc>,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_km: f64,
}

/// A contiguous visibility window above the local horizon.
///
/// `sample_range` holds the inclusive indices of the sample slice backing
/// this window when it was derived from a sampled track; windows folded
/// from an event stream alone carry no samples.
#[derive(Debug, Clone, Serialize)]
pub struct PassWindow {
    pub rise: DateTime<Utc>,
    pub culmination: Option<DateTime<Utc>>,
    pub set: DateTime<Utc>,
    pub sample_range: Option<(usize, usize)>,
}

impl PassWindow {
    /// Build a window, enforcing `rise < set` and, when a culmination is
    /// present, `rise <= culmination <= set`.
    pub fn new(
        rise: DateTime<Utc>,
        culmination: Option<DateTime<Utc>>,
        set: DateTime<Utc>,
        sample_range: Option<(usize, usize)>,
    ) -> Result<Self, PassError> {
        if set <= rise {
            return Err(PassError::MalformedEventSequence {
                instant: set,
                reason: format!("set does not follow the rise at {rise}"),
            });
        }
        if let Some(tca) = culmination {
            if tca < rise || tca > set {
                return Err(PassError::MalformedEventSequence {
                    instant: tca,
                    reason: "culmination outside the rise/set interval".to_string(),
                });
            }
        }
        Ok(Self {
            rise,
            culmination,
            set,
            sample_range,
        })
    }

    /// Whole seconds between rise and set. Fractional seconds are below
    /// the reporting granularity.
    pub fn duration_seconds(&self) -> i64 {
        (self.set - self.rise).num_seconds()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum CheckpointLabel {
    Rise,
    Quarter,
    Mid,
    ThreeQuarter,
    Set,
}

/// A representative sample reported for a pass.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Checkpoint {
    pub label: CheckpointLabel,
    pub instant: DateTime<Utc>,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
}
