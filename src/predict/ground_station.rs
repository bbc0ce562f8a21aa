/// Fixed observer location on the WGS-84 ellipsoid.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroundStation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
}

impl GroundStation {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        }
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    pub fn position_ecef_km(&self) -> [f64; 3] {
        // WGS-84 constants
        let a = 6378.137;
        let e2 = 0.00669437999014;
        let lat = self.lat_rad();
        let lon = self.lon_rad();
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let alt_km = self.altitude_m / 1000.0;
        [
            (n + alt_km) * cos_lat * lon.cos(),
            (n + alt_km) * cos_lat * lon.sin(),
            (n * (1.0 - e2) + alt_km) * sin_lat,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn equator_prime_meridian_sits_on_the_x_axis() {
        let station = GroundStation::new(0.0, 0.0, 0.0);
        let pos = station.position_ecef_km();
        assert_relative_eq!(pos[0], 6378.137, epsilon = 1e-9);
        assert_relative_eq!(pos[1], 0.0, epsilon = 1e-9);
        assert_relative_eq!(pos[2], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn altitude_extends_the_radius() {
        let sea = GroundStation::new(45.0, -75.0, 0.0).position_ecef_km();
        let high = GroundStation::new(45.0, -75.0, 1000.0).position_ecef_km();
        let r_sea = (sea[0] * sea[0] + sea[1] * sea[1] + sea[2] * sea[2]).sqrt();
        let r_high = (high[0] * high[0] + high[1] * high[1] + high[2] * high[2]).sqrt();
        assert_relative_eq!(r_high - r_sea, 1.0, epsilon = 1e-3);
    }
}
