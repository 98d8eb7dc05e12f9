mod error;
mod identity;
mod sample;
mod sky;
mod track;

pub use error::{SampleError, TrackError};
pub use identity::{same_identity, Identified, SatelliteId};
pub use sample::{HistoryPoint, SatelliteSample};
pub use sky::{RetentionPolicy, SharedSky, SkyView};
pub use track::SatelliteTrack;
