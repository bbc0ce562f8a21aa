use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::civil::CivilTime;
use crate::passes::{Checkpoint, TruncatedPass, WindowSet};

/// One machine-readable pass record for the `--json` output mode.
#[derive(Debug, Serialize)]
struct PassRecord {
    rise: DateTime<Utc>,
    culmination: Option<DateTime<Utc>>,
    set: DateTime<Utc>,
    rise_timestamp: f64,
    duration_seconds: i64,
}

#[derive(Debug, Serialize)]
struct PassReport {
    object: String,
    passes: Vec<PassRecord>,
    truncated: Option<TruncatedPass>,
}

/// Print the tabular pass report: a two-line header, then one line per
/// pass with rise time, set time, rise epoch timestamp and duration in
/// whole seconds.
pub fn print_pass_table(object: &str, set: &WindowSet, civil: &CivilTime) {
    println!("Table of satellite passes for {object}");
    println!("Start Time           Stop Time            Timestamp              Seconds");
    for window in &set.windows {
        println!(
            "{} {} {:<17.6}\t{}",
            civil.format(&window.rise),
            civil.format(&window.set),
            CivilTime::epoch_seconds(&window.rise),
            window.duration_seconds()
        );
    }
    if let Some(truncated) = &set.truncated {
        println!(
            "{} (pass still in progress at the end of the interval)",
            civil.format(&truncated.rise)
        );
    }
}

pub fn print_passes_json(object: &str, set: &WindowSet) -> serde_json::Result<()> {
    let report = PassReport {
        object: object.to_string(),
        passes: set
            .windows
            .iter()
            .map(|w| PassRecord {
                rise: w.rise,
                culmination: w.culmination,
                set: w.set,
                rise_timestamp: CivilTime::epoch_seconds(&w.rise),
                duration_seconds: w.duration_seconds(),
            })
            .collect(),
        truncated: set.truncated,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Print the five-checkpoint table for one pass. Azimuth is reported to
/// the whole degree, elevation to one decimal.
pub fn print_checkpoints(checkpoints: &[Checkpoint], civil: &CivilTime) {
    println!("Checkpoint      Time                  Az [deg]  El [deg]");
    for checkpoint in checkpoints {
        println!(
            "{:<14} {}  {:>8.0}  {:>8.1}",
            checkpoint.label,
            civil.format(&checkpoint.instant),
            checkpoint.azimuth_deg,
            checkpoint.elevation_deg
        );
    }
}
