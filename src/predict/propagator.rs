use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use super::error::PredictError;
use super::ground_station::GroundStation;
use super::provider::GeometryProvider;
use crate::passes::ObservationSample;

/// SGP4-backed geometry for one satellite observed from one station.
pub struct Sgp4Provider {
    station: GroundStation,
    elements: Elements,
    constants: Constants,
}

impl Sgp4Provider {
    pub fn new(station: GroundStation, elements: Elements, constants: Constants) -> Self {
        Self {
            station,
            elements,
            constants,
        }
    }
}

impl GeometryProvider for Sgp4Provider {
    fn sample_geometry(&self, instant: DateTime<Utc>) -> Result<ObservationSample, PredictError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&instant.naive_utc())
            .map_err(|e| PredictError::Propagation(e.to_string()))?;

        let prediction = self
            .constants
            .propagate(minutes)
            .map_err(|e| PredictError::Propagation(e.to_string()))?;

        let sidereal = sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(
            &instant.naive_utc(),
        ));

        let sat_ecef = teme_to_ecef_position(prediction.position, sidereal);
        let sta_ecef = self.station.position_ecef_km();
        let dr = [
            sat_ecef[0] - sta_ecef[0],
            sat_ecef[1] - sta_ecef[1],
            sat_ecef[2] - sta_ecef[2],
        ];
        let range_km = (dr[0] * dr[0] + dr[1] * dr[1] + dr[2] * dr[2]).sqrt();

        let (east, north, up) = ecef_to_enu(dr, self.station.lat_rad(), self.station.lon_rad());
        let azimuth_deg = east.atan2(north).to_degrees().rem_euclid(360.0);
        let elevation_deg = if range_km > 0.0 {
            (up / range_km).asin().to_degrees()
        } else {
            0.0
        };

        Ok(ObservationSample {
            instant,
            azimuth_deg,
            elevation_deg,
            range_km,
        })
    }
}

/// Rotate a TEME position into ECEF by the Greenwich sidereal angle.
pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

/// Project a station-relative ECEF vector onto the local east/north/up
/// frame.
pub fn ecef_to_enu(dr: [f64; 3], lat_rad: f64, lon_rad: f64) -> (f64, f64, f64) {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    let east = -sin_lon * dr[0] + cos_lon * dr[1];
    let north = -sin_lat * cos_lon * dr[0] - sin_lat * sin_lon * dr[1] + cos_lat * dr[2];
    let up = cos_lat * cos_lon * dr[0] + cos_lat * sin_lon * dr[1] + sin_lat * dr[2];
    (east, north, up)
}
