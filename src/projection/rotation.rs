use chrono::{DateTime, Utc};

use super::observer::GeoPosition;

/// Earth's rotation relative to the fixed stars, degrees per day.
pub const SIDEREAL_DEGREES_PER_DAY: f64 = 360.985647;
pub const SIDEREAL_DEGREES_PER_SECOND: f64 = SIDEREAL_DEGREES_PER_DAY / 86_400.0;

/// Moves a position measured at `measured_at` into the map frame of
/// `reference_at` by turning the grid underneath it about the polar axis.
///
/// Callers must pass `reference_at >= measured_at`; an earlier reference just
/// shifts the longitude the other way. The result is not wrapped.
pub fn correct(
    position: GeoPosition,
    measured_at: DateTime<Utc>,
    reference_at: DateTime<Utc>,
) -> GeoPosition {
    correct_by_seconds(position, elapsed_seconds(measured_at, reference_at))
}

pub fn correct_by_seconds(position: GeoPosition, elapsed_s: f64) -> GeoPosition {
    GeoPosition {
        latitude: position.latitude,
        longitude: position.longitude - elapsed_s * SIDEREAL_DEGREES_PER_SECOND,
    }
}

fn elapsed_seconds(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1e6,
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}
