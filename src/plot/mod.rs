mod render;
mod series;

pub use render::{render_altaz, render_polar};
pub use series::{interior_ticks, prepare_altaz, prepare_polar, CartesianSeries, PolarSeries};
