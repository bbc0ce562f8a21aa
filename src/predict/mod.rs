mod error;
mod ground_station;
mod propagator;
mod provider;
mod tle;

pub use error::PredictError;
pub use ground_station::GroundStation;
pub use propagator::Sgp4Provider;
pub use provider::GeometryProvider;
pub use tle::{load_tle_file, TleRecord};
