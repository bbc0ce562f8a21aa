use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CivilTimeError {
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Display timezone for one run. Threaded explicitly through every
/// formatting call site; there is no process-wide default.
#[derive(Debug, Clone, Copy)]
pub struct CivilTime {
    tz: Tz,
}

impl CivilTime {
    pub fn utc() -> Self {
        Self { tz: Tz::UTC }
    }

    /// Resolve a named zone, failing fast on an unrecognized name. Never
    /// falls back to UTC.
    pub fn from_name(name: &str) -> Result<Self, CivilTimeError> {
        name.parse::<Tz>()
            .map(|tz| Self { tz })
            .map_err(|_| CivilTimeError::UnknownTimezone(name.to_string()))
    }

    pub fn zone_name(&self) -> &'static str {
        self.tz.name()
    }

    /// `YYYY Mon DD HH:MM:SS` in the configured zone.
    pub fn format(&self, instant: &DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.tz)
            .format("%Y %b %d %H:%M:%S")
            .to_string()
    }

    /// `HH:MM:SS`, used for polar chart annotations.
    pub fn format_clock(&self, instant: &DateTime<Utc>) -> String {
        instant.with_timezone(&self.tz).format("%H:%M:%S").to_string()
    }

    /// `HH:MM`, used for cartesian axis labels.
    pub fn format_minutes(&self, instant: &DateTime<Utc>) -> String {
        instant.with_timezone(&self.tz).format("%H:%M").to_string()
    }

    /// Fractional epoch seconds for machine-readable output.
    pub fn epoch_seconds(instant: &DateTime<Utc>) -> f64 {
        instant.timestamp_micros() as f64 / 1e6
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDateTime;

    fn at(epoch: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(epoch, 0).unwrap()
    }

    #[test]
    fn formats_utc_epoch_zero() {
        let civil = CivilTime::utc();
        assert_eq!(civil.format(&at(0)), "1970 Jan 01 00:00:00");
    }

    #[test]
    fn named_zone_shifts_the_clock() {
        let civil = CivilTime::from_name("America/New_York").unwrap();
        // 2020-01-15 12:00 UTC is 07:00 EST
        let instant = at(1579089600);
        assert_eq!(civil.format(&instant), "2020 Jan 15 07:00:00");
        assert_eq!(civil.format_clock(&instant), "07:00:00");
        assert_eq!(civil.format_minutes(&instant), "07:00");
    }

    #[test]
    fn unknown_zone_fails_fast() {
        let err = CivilTime::from_name("Mars/Olympus_Mons").unwrap_err();
        assert!(matches!(err, CivilTimeError::UnknownTimezone(name) if name == "Mars/Olympus_Mons"));
    }

    #[test]
    fn utc_formatting_round_trips_the_epoch() {
        let civil = CivilTime::utc();
        for epoch in [0_i64, 1000, 1579089600, 2145916799] {
            let rendered = civil.format(&at(epoch));
            let parsed = NaiveDateTime::parse_from_str(&rendered, "%Y %b %d %H:%M:%S").unwrap();
            assert_eq!(parsed.and_utc().timestamp(), epoch);
        }
    }

    #[test]
    fn epoch_seconds_keeps_the_fraction() {
        let instant = DateTime::from_timestamp(1, 500_000_000).unwrap();
        assert_relative_eq!(CivilTime::epoch_seconds(&instant), 1.5, epsilon = 1e-9);
    }
}
