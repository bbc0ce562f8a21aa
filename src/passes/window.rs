use chrono::{DateTime, Utc};
use log::warn;

use super::error::PassError;
use super::types::{EventKind, EventMarker, ObservationSample, PassWindow};

/// A trailing pass whose rise falls inside the search interval but whose
/// set does not. This is an expected boundary outcome, reported alongside
/// the completed windows rather than folded into them.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct TruncatedPass {
    pub rise: DateTime<Utc>,
    pub culmination: Option<DateTime<Utc>>,
}

/// Result of folding a normalized event stream.
///
/// Structural defects abort only the window under construction; windows
/// before and after a defect are still built.
#[derive(Debug, Default)]
pub struct WindowSet {
    pub windows: Vec<PassWindow>,
    pub truncated: Option<TruncatedPass>,
    pub defects: Vec<PassError>,
}

/// Fold consecutive `{Rise, [Culmination], Set}` runs into pass windows.
pub fn build_windows(events: &[EventMarker]) -> WindowSet {
    let mut out = WindowSet::default();
    let mut open: Option<(DateTime<Utc>, Option<DateTime<Utc>>)> = None;

    for event in events {
        match event.kind {
            EventKind::Rise => {
                if let Some((rise, _)) = open.replace((event.instant, None)) {
                    out.defects.push(PassError::MalformedEventSequence {
                        instant: event.instant,
                        reason: format!("rise while the pass rising at {rise} is still open"),
                    });
                }
            }
            EventKind::Culmination => match open.as_mut() {
                Some((_, tca)) => *tca = Some(event.instant),
                None => out.defects.push(PassError::MalformedEventSequence {
                    instant: event.instant,
                    reason: "culmination without a preceding rise".to_string(),
                }),
            },
            EventKind::Set => match open.take() {
                Some((rise, tca)) => match PassWindow::new(rise, tca, event.instant, None) {
                    Ok(window) => out.windows.push(window),
                    Err(err) => out.defects.push(err),
                },
                None => out.defects.push(PassError::MalformedEventSequence {
                    instant: event.instant,
                    reason: "set without a preceding rise".to_string(),
                }),
            },
        }
    }

    if let Some((rise, culmination)) = open {
        warn!("{}", PassError::TruncatedTrailingPass { rise });
        out.truncated = Some(TruncatedPass { rise, culmination });
    }
    for defect in &out.defects {
        warn!("skipping malformed window: {defect}");
    }
    out
}

/// Derive a window from the contiguous above-horizon run of a sampled
/// track, with the culmination at the maximum-elevation sample. Returns
/// `None` when the object never clears the horizon.
pub fn window_from_samples(
    samples: &[ObservationSample],
) -> Result<Option<PassWindow>, PassError> {
    let Some(i) = samples.iter().position(|s| s.elevation_deg > 0.0) else {
        return Ok(None);
    };
    let j = samples
        .iter()
        .rposition(|s| s.elevation_deg > 0.0)
        .unwrap_or(i);
    if i == j {
        return Err(PassError::EmptySampleSlice {
            start: i,
            end: j,
            len: 1,
        });
    }

    let mut peak = i;
    for k in i..=j {
        if samples[k].elevation_deg > samples[peak].elevation_deg {
            peak = k;
        }
    }

    let window = PassWindow::new(
        samples[i].instant,
        Some(samples[peak].instant),
        samples[j].instant,
        Some((i, j)),
    )?;
    Ok(Some(window))
}
