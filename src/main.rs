mod civil;
mod passes;
mod plot;
mod predict;
mod report;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};

use crate::civil::{CivilTime, CivilTimeError};
use crate::passes::{build_windows, normalize_events, sample_checkpoints, window_from_samples};
use crate::plot::{prepare_altaz, prepare_polar, render_altaz, render_polar};
use crate::predict::{load_tle_file, GeometryProvider, GroundStation, Sgp4Provider};

/// Visualization sampling cadence: one sample per 90 seconds of pass.
const PLOT_STEP_SECONDS: i64 = 90;
const DEFAULT_TIMEZONE: &str = "Canada/Eastern";

#[derive(Parser)]
#[command(name = "satpass")]
#[command(about = "Satellite pass times and sky-track plots for a ground station")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct StationArgs {
    /// Groundstation latitude (degrees)
    #[arg(long)]
    lat: f64,
    /// Groundstation longitude (degrees)
    #[arg(long)]
    lon: f64,
    /// Groundstation altitude (meters)
    #[arg(long, default_value_t = 0.0)]
    alt: f64,
}

impl StationArgs {
    fn ground_station(&self) -> GroundStation {
        GroundStation::new(self.lat, self.lon, self.alt)
    }
}

#[derive(Args)]
struct TimezoneArgs {
    /// Show times in UTC
    #[arg(long, conflicts_with = "timezone")]
    utc: bool,
    /// Display timezone name
    #[arg(long, default_value = DEFAULT_TIMEZONE)]
    timezone: String,
}

impl TimezoneArgs {
    fn civil(&self) -> Result<CivilTime, CivilTimeError> {
        if self.utc {
            Ok(CivilTime::utc())
        } else {
            CivilTime::from_name(&self.timezone)
        }
    }
}

#[derive(Args)]
struct PlotArgs {
    /// Input TLE file
    #[arg(long)]
    tle_file: PathBuf,
    /// Start timestamp in seconds since epoch
    #[arg(long)]
    start_timestamp: f64,
    /// Pass time in seconds
    #[arg(long)]
    length_pass: i64,
    #[command(flatten)]
    station: StationArgs,
    #[command(flatten)]
    tz: TimezoneArgs,
    /// Output PNG path
    #[arg(long)]
    output: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// List pass times over a date interval
    Passes {
        /// Input TLE file
        #[arg(long)]
        tle_file: PathBuf,
        /// Start date in format YYYY-MM-DD
        #[arg(long)]
        start_date: String,
        /// End date in format YYYY-MM-DD
        #[arg(long)]
        end_date: String,
        #[command(flatten)]
        station: StationArgs,
        #[command(flatten)]
        tz: TimezoneArgs,
        /// Emit JSON instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Draw one pass on a polar sky chart
    Polar(PlotArgs),
    /// Draw elevation and azimuth traces for one pass
    Altaz(PlotArgs),
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Passes {
            tle_file,
            start_date,
            end_date,
            station,
            tz,
            json,
        } => run_passes(&tle_file, &start_date, &end_date, &station, &tz, json),
        Commands::Polar(args) => run_polar(&args),
        Commands::Altaz(args) => run_altaz(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_passes(
    tle_file: &Path,
    start_date: &str,
    end_date: &str,
    station: &StationArgs,
    tz: &TimezoneArgs,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    // configuration errors abort before any window processing
    let civil = tz.civil()?;
    let start = parse_date(start_date)?;
    let end = parse_date(end_date)?;
    if end <= start {
        return Err(format!("end date {end_date} is not after start date {start_date}").into());
    }

    let record = load_tle_file(tle_file)?;
    let provider = Sgp4Provider::new(station.ground_station(), record.elements, record.constants);
    log::info!(
        "searching passes for {} between {start} and {end} ({})",
        record.name,
        civil.zone_name()
    );

    let events = provider.emit_events(start, end)?;
    let events = normalize_events(&events)?;
    let set = build_windows(&events);

    if json {
        report::print_passes_json(&record.name, &set)?;
    } else {
        report::print_pass_table(&record.name, &set, &civil);
    }
    Ok(())
}

fn run_polar(args: &PlotArgs) -> Result<(), Box<dyn Error>> {
    let civil = args.tz.civil()?;
    let (name, samples) = sampled_pass(args)?;

    let series = prepare_polar(&samples, (0, samples.len() - 1), &civil);
    render_polar(&series, &name, &args.output)?;
    log::info!("wrote {}", args.output.display());
    Ok(())
}

fn run_altaz(args: &PlotArgs) -> Result<(), Box<dyn Error>> {
    let civil = args.tz.civil()?;
    let (name, samples) = sampled_pass(args)?;

    let Some(window) = window_from_samples(&samples)? else {
        println!("No pass above the horizon in the requested interval");
        return Ok(());
    };
    let range = window.sample_range.unwrap_or((0, samples.len() - 1));

    println!("Rises: {}", civil.format(&window.rise));
    println!("Sets:  {}", civil.format(&window.set));
    let checkpoints = sample_checkpoints(&samples, range)?;
    report::print_checkpoints(&checkpoints, &civil);

    let series = prepare_altaz(&samples, range, &civil);
    render_altaz(&series, &name, &args.output)?;
    log::info!("wrote {}", args.output.display());
    Ok(())
}

/// Load the TLE and sample the requested interval at the fixed plot
/// cadence. Returns the object name and the sampled track.
fn sampled_pass(
    args: &PlotArgs,
) -> Result<(String, Vec<crate::passes::ObservationSample>), Box<dyn Error>> {
    if args.length_pass <= 0 {
        return Err("pass length must be positive".into());
    }
    let start = timestamp_to_instant(args.start_timestamp)?;
    let end = start + Duration::seconds(args.length_pass);

    let record = load_tle_file(&args.tle_file)?;
    let provider = Sgp4Provider::new(
        args.station.ground_station(),
        record.elements,
        record.constants,
    );
    let samples = provider.sample_track(start, end, Duration::seconds(PLOT_STEP_SECONDS))?;
    if samples.len() < 2 {
        return Err("pass is shorter than one plot step".into());
    }

    Ok((record.name, samples))
}

fn parse_date(text: &str) -> Result<DateTime<Utc>, Box<dyn Error>> {
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| format!("invalid date: {text}"))?;
    Ok(DateTime::from_naive_utc_and_offset(midnight, Utc))
}

fn timestamp_to_instant(seconds: f64) -> Result<DateTime<Utc>, Box<dyn Error>> {
    DateTime::from_timestamp_micros((seconds * 1e6) as i64)
        .ok_or_else(|| format!("timestamp {seconds} out of range").into())
}
