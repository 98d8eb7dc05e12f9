mod error;
pub mod geometry;
mod observer;
pub mod rotation;
mod track_projector;

pub use error::ProjectionError;
pub use geometry::{project, GROUND_RADIUS};
pub use observer::{GeoPosition, Observer};
pub use rotation::{correct, SIDEREAL_DEGREES_PER_DAY};
pub use track_projector::{RenderedTrack, TrackProjector, TrailPoint};
