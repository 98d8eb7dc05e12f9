//! Ground-track projection for GNSS satellites seen from a fixed antenna.
//!
//! Azimuth/elevation readings are turned into sub-satellite latitude and
//! longitude, and older readings are rotated into the map frame of a common
//! reference time so a satellite's trail lines up with its current position.

pub mod config;
pub mod constellation;
pub mod palette;
pub mod projection;
pub mod time_expr;
pub mod track;
