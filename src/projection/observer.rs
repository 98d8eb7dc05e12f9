use serde::{Deserialize, Serialize};

/// Ground antenna location in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Observer {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl Observer {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }

    /// Parses `"lat, lon"`, extra comma separated fields are ignored.
    pub fn from_coordinates(coordinates: &str) -> Option<Self> {
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() < 2 {
            return None;
        }
        let lat: f64 = parts[0].parse().ok()?;
        let lon: f64 = parts[1].parse().ok()?;
        if !lat.is_finite() || !lon.is_finite() || lat.abs() > 90.0 {
            return None;
        }
        Some(Self::new(lat, lon))
    }
}

/// Geographic point in decimal degrees. Longitude is not wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPosition {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Same point with the longitude folded into [-180, 180).
    pub fn wrapped(&self) -> Self {
        Self {
            latitude: self.latitude,
            longitude: (self.longitude + 180.0).rem_euclid(360.0) - 180.0,
        }
    }
}
