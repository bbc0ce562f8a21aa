use std::error::Error;
use std::path::Path;

use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

use super::series::{CartesianSeries, PolarSeries};

const SKY_SIZE: (u32, u32) = (700, 700);
const ALTAZ_SIZE: (u32, u32) = (900, 640);

/// Draw a prepared sky track as a polar chart: north up, azimuth
/// clockwise, zenith at the center, horizon on the outer ring.
pub fn render_polar(series: &PolarSeries, title: &str, path: &Path) -> Result<(), Box<dyn Error>> {
    let area = BitMapBackend::new(path, SKY_SIZE).into_drawing_area();
    area.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&area)
        .margin(20)
        .caption(title, ("sans-serif", 24))
        .build_cartesian_2d(-105.0f64..105.0, -105.0f64..105.0)?;

    // Elevation rings at 0, 30 and 60 degrees plus the cardinal spokes.
    let grid = BLACK.mix(0.25);
    for ring in [90.0f64, 60.0, 30.0] {
        let outline: Vec<(f64, f64)> = (0..=360)
            .map(|d| {
                let a = (d as f64).to_radians();
                (ring * a.sin(), ring * a.cos())
            })
            .collect();
        chart.draw_series(std::iter::once(PathElement::new(outline, grid)))?;
    }
    for (dx, dy, name) in [
        (0.0, 1.0, "N"),
        (1.0, 0.0, "E"),
        (0.0, -1.0, "S"),
        (-1.0, 0.0, "W"),
    ] {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(0.0, 0.0), (90.0 * dx, 90.0 * dy)],
            grid,
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            name.to_string(),
            (97.0 * dx, 97.0 * dy),
            ("sans-serif", 18),
        )))?;
    }

    let points: Vec<(f64, f64)> = series
        .theta_rad
        .iter()
        .zip(&series.radius)
        .map(|(&theta, &r)| (r * theta.sin(), r * theta.cos()))
        .collect();
    chart.draw_series(LineSeries::new(points.clone(), &RED))?;
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, RED.filled())),
    )?;
    for (point, label) in points.iter().zip(&series.labels) {
        chart.draw_series(std::iter::once(Text::new(
            label.clone(),
            (point.0, point.1),
            ("sans-serif", 12),
        )))?;
    }

    area.present()?;
    Ok(())
}

/// Draw a prepared cartesian series as stacked elevation and azimuth
/// charts sharing the time axis. Axis labels come from the series' tick
/// subset.
pub fn render_altaz(
    series: &CartesianSeries,
    title: &str,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let area = BitMapBackend::new(path, ALTAZ_SIZE).into_drawing_area();
    area.fill(&WHITE)?;
    let (top, bottom) = area.split_vertically(ALTAZ_SIZE.1 / 2);

    let x_max = (series.time_labels.len().saturating_sub(1) as f64).max(1.0);

    let mut elevation = ChartBuilder::on(&top)
        .margin(10)
        .caption(title, ("sans-serif", 22))
        .x_label_area_size(25)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0f64..x_max, 0.0f64..90.0)?;
    elevation
        .configure_mesh()
        .y_desc("Elevation [deg]")
        .x_labels(0)
        .y_labels(7)
        .light_line_style(&WHITE)
        .draw()?;
    elevation.draw_series(LineSeries::new(
        series
            .elevation_deg
            .iter()
            .enumerate()
            .map(|(k, &el)| (k as f64, el)),
        &RED,
    ))?;
    draw_time_ticks(&mut elevation, series, 4.0)?;

    let mut azimuth = ChartBuilder::on(&bottom)
        .margin(10)
        .x_label_area_size(25)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0f64..x_max, 0.0f64..360.0)?;
    azimuth
        .configure_mesh()
        .y_desc("Azimuth [deg]")
        .x_labels(0)
        .y_labels(9)
        .light_line_style(&WHITE)
        .draw()?;
    azimuth.draw_series(LineSeries::new(
        series
            .azimuth_deg
            .iter()
            .enumerate()
            .map(|(k, &az)| (k as f64, az)),
        &BLUE,
    ))?;
    draw_time_ticks(&mut azimuth, series, 14.0)?;

    area.present()?;
    Ok(())
}

fn draw_time_ticks<DB: DrawingBackend>(
    chart: &mut ChartContext<DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    series: &CartesianSeries,
    y: f64,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    for &tick in &series.ticks {
        chart.draw_series(std::iter::once(Text::new(
            series.time_labels[tick].clone(),
            (tick as f64, y),
            ("sans-serif", 14),
        )))?;
    }
    Ok(())
}
