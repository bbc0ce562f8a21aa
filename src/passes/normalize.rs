use log::debug;

use super::error::PassError;
use super::types::{EventKind, EventMarker};

/// Trim a chronological event stream so it starts at a rise.
///
/// A leading `Set` belongs to a pass that began before the search interval
/// and is dropped. If the stream then starts with a `Culmination`, its rise
/// also preceded the interval, so the culmination and its set are both
/// dropped. A pass is only reportable if its rise occurs inside the
/// requested window.
pub fn normalize_events(events: &[EventMarker]) -> Result<Vec<EventMarker>, PassError> {
    for pair in events.windows(2) {
        if pair[1].instant < pair[0].instant {
            return Err(PassError::MalformedEventSequence {
                instant: pair[1].instant,
                reason: format!("{} marker precedes its predecessor", pair[1].kind),
            });
        }
    }

    let mut trimmed = events;
    if matches!(trimmed.first().map(|m| m.kind), Some(EventKind::Set)) {
        debug!("dropping leading set at {}", trimmed[0].instant);
        trimmed = &trimmed[1..];
    }
    if matches!(trimmed.first().map(|m| m.kind), Some(EventKind::Culmination)) {
        debug!(
            "dropping leading culmination at {} and its set",
            trimmed[0].instant
        );
        trimmed = &trimmed[trimmed.len().min(2)..];
    }
    Ok(trimmed.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn marker(kind: EventKind, epoch: i64) -> EventMarker {
        EventMarker {
            kind,
            instant: DateTime::from_timestamp(epoch, 0).unwrap(),
            azimuth_deg: None,
            elevation_deg: None,
        }
    }

    fn kinds(events: &[EventMarker]) -> Vec<EventKind> {
        events.iter().map(|m| m.kind).collect()
    }

    #[test]
    fn drops_leading_set() {
        let stream = [
            marker(EventKind::Set, 1),
            marker(EventKind::Rise, 2),
            marker(EventKind::Culmination, 3),
            marker(EventKind::Set, 4),
        ];
        let normalized = normalize_events(&stream).unwrap();
        assert_eq!(
            kinds(&normalized),
            vec![EventKind::Rise, EventKind::Culmination, EventKind::Set]
        );
        assert_eq!(normalized[0].instant.timestamp(), 2);
    }

    #[test]
    fn drops_leading_culmination_and_its_set() {
        let stream = [
            marker(EventKind::Culmination, 1),
            marker(EventKind::Set, 2),
            marker(EventKind::Rise, 3),
            marker(EventKind::Set, 4),
        ];
        let normalized = normalize_events(&stream).unwrap();
        assert_eq!(kinds(&normalized), vec![EventKind::Rise, EventKind::Set]);
        assert_eq!(normalized[0].instant.timestamp(), 3);
    }

    #[test]
    fn clean_stream_is_unchanged() {
        let stream = [
            marker(EventKind::Rise, 1),
            marker(EventKind::Culmination, 2),
            marker(EventKind::Set, 3),
        ];
        let normalized = normalize_events(&stream).unwrap();
        assert_eq!(kinds(&normalized), kinds(&stream));
    }

    #[test]
    fn interval_with_only_a_partial_pass_yields_empty() {
        let stream = [
            marker(EventKind::Culmination, 1),
            marker(EventKind::Set, 2),
        ];
        assert!(normalize_events(&stream).unwrap().is_empty());
        assert!(normalize_events(&[]).unwrap().is_empty());
    }

    #[test]
    fn starts_with_rise_or_is_empty() {
        let streams: Vec<Vec<EventMarker>> = vec![
            vec![marker(EventKind::Set, 1)],
            vec![marker(EventKind::Set, 1), marker(EventKind::Rise, 2)],
            vec![
                marker(EventKind::Culmination, 1),
                marker(EventKind::Set, 2),
                marker(EventKind::Rise, 3),
            ],
            vec![],
        ];
        for stream in streams {
            let normalized = normalize_events(&stream).unwrap();
            assert!(
                normalized.is_empty() || normalized[0].kind == EventKind::Rise,
                "normalized stream must start at a rise: {normalized:?}"
            );
        }
    }

    #[test]
    fn rejects_non_chronological_stream() {
        let stream = [marker(EventKind::Rise, 5), marker(EventKind::Set, 3)];
        let err = normalize_events(&stream).unwrap_err();
        assert!(matches!(err, PassError::MalformedEventSequence { instant, .. }
            if instant.timestamp() == 3));
    }
}
