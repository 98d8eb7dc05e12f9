use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SampleError {
    #[error("elevation {0} outside [0, 90] degrees")]
    ElevationOutOfRange(f64),
    #[error("azimuth {0} outside [0, 360) degrees")]
    AzimuthOutOfRange(f64),
}

#[derive(Debug, Error, PartialEq)]
pub enum TrackError {
    #[error("invalid sample: {0}")]
    Sample(#[from] SampleError),
    #[error("sample for {got} does not belong to track {expected}")]
    IdentityMismatch { expected: String, got: String },
    #[error("sample at {timestamp} is not newer than last seen {last_seen}")]
    OutOfOrder {
        last_seen: DateTime<Utc>,
        timestamp: DateTime<Utc>,
    },
}
