use super::error::ProjectionError;
use super::observer::{GeoPosition, Observer};

/// Earth radius in thousands of km, the unit of the constellation altitudes.
pub const GROUND_RADIUS: f64 = 6.37;

/// Tolerance for `asin` arguments that drift past ±1 through rounding.
const UNIT_SPHERE_EPSILON: f64 = 1e-9;

/// Negative discriminants within this fraction of `b²` are cancellation
/// error and count as a double root.
const DISCRIMINANT_EPSILON: f64 = 1e-12;

/// Sub-satellite point for an azimuth/elevation reading taken at `observer`,
/// assuming the satellite orbits at radius `orbit`.
pub fn project(
    azimuth_deg: f64,
    elevation_deg: f64,
    orbit: f64,
    observer: &Observer,
) -> Result<GeoPosition, ProjectionError> {
    if !observer.latitude_deg.is_finite() || !observer.longitude_deg.is_finite() {
        return Err(ProjectionError::InvalidObserver {
            latitude: observer.latitude_deg,
            longitude: observer.longitude_deg,
        });
    }

    let local = line_of_sight_xyz(azimuth_deg, elevation_deg, orbit, GROUND_RADIUS)?;
    let equatorial = rotate_by_latitude(local, observer.latitude_deg);
    let (lat, lon) = xyz_to_lat_long(equatorial)?;

    Ok(GeoPosition::new(lat, lon + observer.longitude_deg))
}

/// Intersection of the line of sight with the orbit sphere, in a frame whose
/// polar axis is the observer's radial line, normalised by `orbit`.
///
/// x points along the horizontal displacement towards north, y along the
/// observer's vertical, z towards east.
pub fn line_of_sight_xyz(
    azimuth_deg: f64,
    elevation_deg: f64,
    orbit: f64,
    ground: f64,
) -> Result<[f64; 3], ProjectionError> {
    if !(0.0..=90.0).contains(&elevation_deg) {
        return Err(ProjectionError::ElevationOutOfRange(elevation_deg));
    }
    if !(0.0..360.0).contains(&azimuth_deg) {
        return Err(ProjectionError::AzimuthOutOfRange(azimuth_deg));
    }
    if !(ground > 0.0 && orbit > ground) {
        return Err(ProjectionError::OrbitBelowGround { orbit, ground });
    }

    let azimuth = azimuth_deg.to_radians();
    let (x1, _) = horizontal_roots(elevation_deg, orbit, ground)?;
    let (_, y2) = vertical_roots(elevation_deg, orbit, ground)?;

    // x·cos(az)·tan(az) == x·sin(az), without the pole of tan at 90/270.
    let x = x1 * azimuth.cos();
    let z = x1 * azimuth.sin();

    Ok([x / orbit, y2 / orbit, z / orbit])
}

/// Horizontal displacement of the intersection: `x² + (ground + x·tan(el))² = orbit²`.
fn horizontal_roots(
    elevation_deg: f64,
    orbit: f64,
    ground: f64,
) -> Result<(f64, f64), ProjectionError> {
    if elevation_deg == 90.0 {
        return Ok((0.0, 0.0));
    }

    let tan_el = elevation_deg.to_radians().tan();
    let a = 1.0 + tan_el * tan_el;
    let b = 2.0 * ground * tan_el;
    let c = ground * ground - orbit * orbit;
    solve_quadratic(a, b, c)
}

/// Vertical coordinate of the intersection, same ray expressed in y.
fn vertical_roots(
    elevation_deg: f64,
    orbit: f64,
    ground: f64,
) -> Result<(f64, f64), ProjectionError> {
    if elevation_deg == 0.0 {
        return Ok((ground, ground));
    }

    let tan_el = elevation_deg.to_radians().tan();
    let k = 1.0 / (tan_el * tan_el);
    let a = -1.0 - k;
    let b = 2.0 * ground * k;
    let c = orbit * orbit - ground * ground * k;
    solve_quadratic(a, b, c)
}

/// Returns `((-b + √D) / 2a, (-b - √D) / 2a)`.
///
/// Near the horizon `b²` and `4ac` agree to more digits than an f64 holds,
/// so a slightly negative `D` is clamped to zero.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Result<(f64, f64), ProjectionError> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant.is_nan() || discriminant < -(b * b) * DISCRIMINANT_EPSILON {
        return Err(ProjectionError::NegativeDiscriminant { discriminant });
    }

    let sqrt_d = discriminant.max(0.0).sqrt();
    Ok(((-b + sqrt_d) / (2.0 * a), (-b - sqrt_d) / (2.0 * a)))
}

/// Rotates about the z axis by `-latitude_deg`.
pub fn rotate_by_latitude(xyz: [f64; 3], latitude_deg: f64) -> [f64; 3] {
    let theta = (-latitude_deg).to_radians();
    let (sin_t, cos_t) = theta.sin_cos();
    [
        xyz[0] * cos_t - xyz[1] * sin_t,
        xyz[0] * sin_t + xyz[1] * cos_t,
        xyz[2],
    ]
}

pub fn xyz_to_lat_long(xyz: [f64; 3]) -> Result<(f64, f64), ProjectionError> {
    let [x, y, z] = xyz;
    if !(x.abs() <= 1.0 + UNIT_SPHERE_EPSILON) {
        return Err(ProjectionError::OffSphere(x));
    }

    let lat = x.clamp(-1.0, 1.0).asin().to_degrees();
    let lon = z.atan2(y).to_degrees();
    Ok((lat, lon))
}
