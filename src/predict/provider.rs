use chrono::{DateTime, Duration, Utc};

use super::error::PredictError;
use crate::passes::{EventKind, EventMarker, ObservationSample};

const COARSE_STEP_SECONDS: i64 = 60; // 1 minute for the initial scan
const FINE_STEP_SECONDS: i64 = 1; // 1 second for crossing refinement
const HORIZON_ELEVATION_DEG: f64 = 0.0;

/// Capability the pass engine is written against: something that can say
/// where the object sits in the observer's sky at a given instant. Event
/// and track generation are derived from that single operation, so tests
/// can substitute a synthetic geometry for the SGP4 provider.
pub trait GeometryProvider {
    fn sample_geometry(&self, instant: DateTime<Utc>) -> Result<ObservationSample, PredictError>;

    /// Horizon-crossing markers over `[start, end]` in chronological
    /// order: a coarse one-minute elevation scan with one-second bisection
    /// refinement of each crossing. The culmination marker sits at the
    /// maximum-elevation scan sample.
    ///
    /// A pass already in progress at `start` yields culmination/set
    /// markers without a rise; a pass still in progress at `end` yields a
    /// rise without a set. Both are resolved downstream by the normalizer
    /// and the window builder.
    fn emit_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<EventMarker>, PredictError> {
        let coarse = Duration::seconds(COARSE_STEP_SECONDS);
        let mut events = Vec::new();
        let mut cursor = start;

        let mut prev_visible: Option<bool> = None;
        let mut peak: Option<ObservationSample> = None;
        let mut culminated = false;

        while cursor <= end {
            let sample = self.sample_geometry(cursor)?;
            let visible = sample.elevation_deg >= HORIZON_ELEVATION_DEG;

            match prev_visible {
                Some(false) if visible => {
                    let rise = refine_crossing(self, cursor - coarse, cursor, true)?;
                    events.push(marker(EventKind::Rise, &rise));
                }
                Some(true) if !visible => {
                    if let (Some(p), false) = (peak.as_ref(), culminated) {
                        events.push(marker(EventKind::Culmination, p));
                    }
                    let set = refine_crossing(self, cursor - coarse, cursor, false)?;
                    events.push(marker(EventKind::Set, &set));
                    peak = None;
                    culminated = false;
                }
                _ => {}
            }

            if visible {
                match peak.as_mut() {
                    Some(p) => {
                        if sample.elevation_deg > p.elevation_deg {
                            *p = sample;
                        } else if !culminated {
                            events.push(marker(EventKind::Culmination, p));
                            culminated = true;
                        }
                    }
                    None => peak = Some(sample),
                }
            }

            prev_visible = Some(visible);
            cursor += coarse;
        }

        Ok(events)
    }

    /// Sample the topocentric trace over `[start, end]` at a fixed step.
    fn sample_track(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: Duration,
    ) -> Result<Vec<ObservationSample>, PredictError> {
        let mut cursor = start;
        let mut points = Vec::new();
        while cursor <= end {
            points.push(self.sample_geometry(cursor)?);
            cursor += step;
        }
        Ok(points)
    }
}

fn marker(kind: EventKind, sample: &ObservationSample) -> EventMarker {
    EventMarker {
        kind,
        instant: sample.instant,
        azimuth_deg: Some(sample.azimuth_deg),
        elevation_deg: Some(sample.elevation_deg),
    }
}

/// Bisect the horizon crossing bracketed by `[before, after]` down to
/// one-second resolution.
fn refine_crossing<P: GeometryProvider + ?Sized>(
    provider: &P,
    before: DateTime<Utc>,
    after: DateTime<Utc>,
    rising: bool,
) -> Result<ObservationSample, PredictError> {
    let mut low = before;
    let mut high = after;

    while (high - low).num_seconds() > FINE_STEP_SECONDS {
        let mid = low + (high - low) / 2;
        let above = provider.sample_geometry(mid)?.elevation_deg >= HORIZON_ELEVATION_DEG;
        if above == rising {
            high = mid;
        } else {
            low = mid;
        }
    }

    provider.sample_geometry(high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::{build_windows, normalize_events};
    use std::f64::consts::PI;

    /// Synthetic geometry: one pass whose elevation follows a sine arch
    /// between `rise` and `set` epochs and is negative outside.
    struct MockProvider {
        rise_epoch: i64,
        set_epoch: i64,
        max_elevation_deg: f64,
    }

    impl GeometryProvider for MockProvider {
        fn sample_geometry(
            &self,
            instant: DateTime<Utc>,
        ) -> Result<ObservationSample, PredictError> {
            let span = (self.set_epoch - self.rise_epoch) as f64;
            let x = (instant.timestamp() - self.rise_epoch) as f64 / span;
            Ok(ObservationSample {
                instant,
                azimuth_deg: (360.0 * x).rem_euclid(360.0),
                elevation_deg: self.max_elevation_deg * (PI * x.clamp(-0.5, 1.5)).sin(),
                range_km: 1000.0,
            })
        }
    }

    fn at(epoch: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(epoch, 0).unwrap()
    }

    #[test]
    fn scan_emits_rise_culmination_set_in_order() {
        let provider = MockProvider {
            rise_epoch: 10_000,
            set_epoch: 10_600,
            max_elevation_deg: 45.0,
        };
        let events = provider.emit_events(at(9_000), at(11_600)).unwrap();
        let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::Rise, EventKind::Culmination, EventKind::Set]
        );

        // refinement brings crossings within 2 s of the true zeroes
        assert!((events[0].instant.timestamp() - 10_000).abs() <= 2);
        assert!((events[2].instant.timestamp() - 10_600).abs() <= 2);
        assert!(events
            .windows(2)
            .all(|pair| pair[0].instant <= pair[1].instant));
    }

    #[test]
    fn events_feed_the_window_pipeline_end_to_end() {
        let provider = MockProvider {
            rise_epoch: 10_000,
            set_epoch: 10_600,
            max_elevation_deg: 45.0,
        };
        let events = provider.emit_events(at(9_000), at(11_600)).unwrap();
        let normalized = normalize_events(&events).unwrap();
        let set = build_windows(&normalized);

        assert_eq!(set.windows.len(), 1);
        assert!(set.truncated.is_none());
        assert!(set.defects.is_empty());
        let window = &set.windows[0];
        assert!((window.duration_seconds() - 600).abs() <= 4);
        let tca = window.culmination.expect("scan reports a culmination");
        assert!((tca.timestamp() - 10_300).abs() <= 60);
    }

    #[test]
    fn interval_starting_mid_pass_yields_no_reportable_window() {
        let provider = MockProvider {
            rise_epoch: 10_000,
            set_epoch: 10_600,
            max_elevation_deg: 45.0,
        };
        // starts after the rise, ends after the set
        let events = provider.emit_events(at(10_120), at(11_600)).unwrap();
        assert!(events.iter().all(|e| e.kind != EventKind::Rise));
        let normalized = normalize_events(&events).unwrap();
        assert!(normalized.is_empty());
        assert!(build_windows(&normalized).windows.is_empty());
    }

    #[test]
    fn interval_ending_mid_pass_is_truncated() {
        let provider = MockProvider {
            rise_epoch: 10_000,
            set_epoch: 10_600,
            max_elevation_deg: 45.0,
        };
        let events = provider.emit_events(at(9_000), at(10_200)).unwrap();
        let normalized = normalize_events(&events).unwrap();
        let set = build_windows(&normalized);
        assert!(set.windows.is_empty());
        let truncated = set.truncated.expect("trailing rise must be reported");
        assert!((truncated.rise.timestamp() - 10_000).abs() <= 2);
    }

    #[test]
    fn track_sampling_honors_the_step() {
        let provider = MockProvider {
            rise_epoch: 0,
            set_epoch: 600,
            max_elevation_deg: 30.0,
        };
        let track = provider
            .sample_track(at(0), at(600), Duration::seconds(90))
            .unwrap();
        assert_eq!(track.len(), 7);
        assert_eq!(track[1].instant, at(90));
    }
}
