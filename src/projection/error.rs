use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("elevation {0} outside [0, 90] degrees")]
    ElevationOutOfRange(f64),
    #[error("azimuth {0} outside [0, 360) degrees")]
    AzimuthOutOfRange(f64),
    #[error("orbit altitude {orbit} must exceed ground radius {ground}")]
    OrbitBelowGround { orbit: f64, ground: f64 },
    #[error("observer coordinates ({latitude}, {longitude}) are not finite")]
    InvalidObserver { latitude: f64, longitude: f64 },
    #[error("negative discriminant {discriminant} in line of sight intersection")]
    NegativeDiscriminant { discriminant: f64 },
    #[error("projected point {0} is off the unit sphere")]
    OffSphere(f64),
}
