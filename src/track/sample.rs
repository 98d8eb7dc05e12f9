use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::SampleError;
use super::identity::Identified;

/// One azimuth/elevation/SNR reading of a satellite, as produced by the
/// sentence parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SatelliteSample {
    pub prn_number: u32,
    pub network: String,
    pub elevation: f64,
    pub azimuth: f64,
    pub snr: f64,
    pub timestamp: DateTime<Utc>,
}

impl SatelliteSample {
    pub fn validate(&self) -> Result<(), SampleError> {
        if !(0.0..=90.0).contains(&self.elevation) {
            return Err(SampleError::ElevationOutOfRange(self.elevation));
        }
        if !(0.0..360.0).contains(&self.azimuth) {
            return Err(SampleError::AzimuthOutOfRange(self.azimuth));
        }
        Ok(())
    }
}

impl Identified for SatelliteSample {
    fn prn_number(&self) -> u32 {
        self.prn_number
    }

    fn network(&self) -> &str {
        &self.network
    }
}

/// Prior reading kept in a track's history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub timestamp: DateTime<Utc>,
    pub elevation: f64,
    pub azimuth: f64,
}
