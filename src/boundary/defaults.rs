//! Construction constants (distances in nautical miles, angles in degrees)

/// Mean Earth radius used by the spherical model
pub const EARTH_RADIUS_NM: f64 = 3438.1451;
/// Samples per full circle
pub const CIRCLE_SAMPLES: usize = 36;
/// Angular step between samples
pub const SAMPLE_STEP_DEG: f64 = 360.0 / CIRCLE_SAMPLES as f64;
/// Decimal places kept for sampled longitudes
pub const SAMPLE_LON_DECIMALS: i32 = 5;
/// Decimal places kept for sampled latitudes
pub const SAMPLE_LAT_DECIMALS: i32 = 4;
/// Decimal places kept for literal boundary points (both axes)
pub const LITERAL_DECIMALS: i32 = 4;
/// Slack when counting arc steps, so a 90.00000000000001° sweep is 9 steps
pub const SWEEP_EPSILON_DEG: f64 = 1e-9;
/// Distinct vertices a ring needs to be emitted
pub const MIN_DISTINCT_POINTS: usize = 3;
