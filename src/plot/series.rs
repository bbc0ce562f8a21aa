use serde::Serialize;

use crate::civil::CivilTime;
use crate::passes::ObservationSample;

/// Fixed display policy: at most this many interior axis labels.
const MAX_INTERIOR_TICKS: usize = 5;

/// Sky-track series for a polar chart: the zenith maps to the center
/// (radius 0), the horizon to the outer ring (radius 90).
#[derive(Debug, Clone, Serialize)]
pub struct PolarSeries {
    /// Azimuth in radians, clockwise from north.
    pub theta_rad: Vec<f64>,
    /// `90 - elevation_deg` per sample.
    pub radius: Vec<f64>,
    /// Formatted local clock time, one label per sample.
    pub labels: Vec<String>,
    pub ticks: Vec<usize>,
}

/// Elevation and azimuth traces over a shared axis of formatted local
/// times.
#[derive(Debug, Clone, Serialize)]
pub struct CartesianSeries {
    pub time_labels: Vec<String>,
    pub elevation_deg: Vec<f64>,
    pub azimuth_deg: Vec<f64>,
    pub ticks: Vec<usize>,
}

pub fn prepare_polar(
    samples: &[ObservationSample],
    range: (usize, usize),
    civil: &CivilTime,
) -> PolarSeries {
    let slice = clamp_slice(samples, range);
    PolarSeries {
        theta_rad: slice.iter().map(|s| s.azimuth_deg.to_radians()).collect(),
        radius: slice.iter().map(|s| 90.0 - s.elevation_deg).collect(),
        labels: slice.iter().map(|s| civil.format_clock(&s.instant)).collect(),
        ticks: interior_ticks(slice.len()),
    }
}

pub fn prepare_altaz(
    samples: &[ObservationSample],
    range: (usize, usize),
    civil: &CivilTime,
) -> CartesianSeries {
    let slice = clamp_slice(samples, range);
    CartesianSeries {
        time_labels: slice
            .iter()
            .map(|s| civil.format_minutes(&s.instant))
            .collect(),
        elevation_deg: slice.iter().map(|s| s.elevation_deg).collect(),
        azimuth_deg: slice.iter().map(|s| s.azimuth_deg).collect(),
        ticks: interior_ticks(slice.len()),
    }
}

/// At most [`MAX_INTERIOR_TICKS`] evenly spaced interior label positions
/// over `len` samples, excluding the first and last index.
pub fn interior_ticks(len: usize) -> Vec<usize> {
    if len < 3 {
        return Vec::new();
    }
    let count = MAX_INTERIOR_TICKS.min(len - 2);
    let last = (len - 1) as f64;
    let mut ticks = Vec::with_capacity(count);
    for t in 1..=count {
        let idx = (t as f64 * last / (count + 1) as f64).round() as usize;
        let idx = idx.clamp(1, len - 2);
        if ticks.last() != Some(&idx) {
            ticks.push(idx);
        }
    }
    ticks
}

fn clamp_slice(samples: &[ObservationSample], range: (usize, usize)) -> &[ObservationSample] {
    if samples.is_empty() {
        return samples;
    }
    let i = range.0.min(samples.len() - 1);
    let j = range.1.clamp(i, samples.len() - 1);
    &samples[i..=j]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{DateTime, Utc};
    use std::f64::consts::FRAC_PI_2;

    fn at(epoch: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(epoch, 0).unwrap()
    }

    fn track(n: usize) -> Vec<ObservationSample> {
        (0..n)
            .map(|k| ObservationSample {
                instant: at(k as i64 * 90),
                azimuth_deg: 90.0,
                elevation_deg: 30.0,
                range_km: 1200.0,
            })
            .collect()
    }

    #[test]
    fn ticks_stay_interior_and_capped() {
        for len in 2..40 {
            let ticks = interior_ticks(len);
            assert!(ticks.len() <= 5, "len {len}: {ticks:?}");
            assert!(
                ticks.iter().all(|&t| t > 0 && t < len - 1),
                "len {len}: {ticks:?}"
            );
            assert!(
                ticks.windows(2).all(|w| w[0] < w[1]),
                "len {len}: {ticks:?}"
            );
        }
    }

    #[test]
    fn two_samples_leave_no_interior_ticks() {
        assert!(interior_ticks(2).is_empty());
        assert!(interior_ticks(0).is_empty());
    }

    #[test]
    fn polar_maps_azimuth_to_radians_and_elevation_to_radius() {
        let samples = track(4);
        let civil = CivilTime::utc();
        let series = prepare_polar(&samples, (0, 3), &civil);
        assert_eq!(series.theta_rad.len(), 4);
        assert_relative_eq!(series.theta_rad[0], FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(series.radius[0], 60.0, epsilon = 1e-12);
        assert_eq!(series.labels[0], "00:00:00");
        assert_eq!(series.labels[1], "00:01:30");
    }

    #[test]
    fn cartesian_traces_share_the_time_axis() {
        let samples = track(8);
        let civil = CivilTime::utc();
        let series = prepare_altaz(&samples, (1, 6), &civil);
        assert_eq!(series.time_labels.len(), 6);
        assert_eq!(series.elevation_deg.len(), 6);
        assert_eq!(series.azimuth_deg.len(), 6);
        assert_eq!(series.time_labels[0], "00:01");
        assert_eq!(series.ticks, interior_ticks(6));
    }

    #[test]
    fn out_of_range_request_is_clamped() {
        let samples = track(3);
        let civil = CivilTime::utc();
        let series = prepare_polar(&samples, (0, 10), &civil);
        assert_eq!(series.theta_rad.len(), 3);
    }
}
