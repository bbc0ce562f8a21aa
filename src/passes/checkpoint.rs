use super::error::PassError;
use super::types::{Checkpoint, CheckpointLabel, ObservationSample};

const LABELS: [CheckpointLabel; 5] = [
    CheckpointLabel::Rise,
    CheckpointLabel::Quarter,
    CheckpointLabel::Mid,
    CheckpointLabel::ThreeQuarter,
    CheckpointLabel::Set,
];

/// Sample five checkpoints over the inclusive slice `[i..=j]` of a
/// window's track: the endpoints plus interior points at
/// `i + round(k * (j - i) / 4)` for k = 1, 2, 3.
///
/// Index-based by design: checkpoints are uniform in sample count, not in
/// elapsed time, so on a non-uniform track the reported times approximate
/// midfractions of the sample count.
pub fn sample_checkpoints(
    samples: &[ObservationSample],
    range: (usize, usize),
) -> Result<Vec<Checkpoint>, PassError> {
    let (i, j) = range;
    if i >= j || j >= samples.len() {
        return Err(PassError::EmptySampleSlice {
            start: i,
            end: j,
            len: j.saturating_sub(i) + 1,
        });
    }

    let span = (j - i) as f64;
    let checkpoints = LABELS
        .iter()
        .enumerate()
        .map(|(k, &label)| {
            let idx = i + (k as f64 * span / 4.0).round() as usize;
            let sample = &samples[idx];
            Checkpoint {
                label,
                instant: sample.instant,
                azimuth_deg: sample.azimuth_deg,
                elevation_deg: sample.elevation_deg,
            }
        })
        .collect();
    Ok(checkpoints)
}
