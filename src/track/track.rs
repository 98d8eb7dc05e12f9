use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use super::error::TrackError;
use super::identity::{same_identity, Identified};
use super::sample::{HistoryPoint, SatelliteSample};

/// Latest reading of one satellite plus its earlier readings, oldest first.
///
/// Every history timestamp is strictly earlier than `last_seen`.
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteTrack {
    prn_number: u32,
    network: String,
    elevation: f64,
    azimuth: f64,
    snr: f64,
    last_seen: DateTime<Utc>,
    history: VecDeque<HistoryPoint>,
    history_limit: Option<usize>,
}

impl SatelliteTrack {
    pub fn new(sample: SatelliteSample) -> Result<Self, TrackError> {
        sample.validate()?;
        Ok(Self {
            prn_number: sample.prn_number,
            network: sample.network,
            elevation: sample.elevation,
            azimuth: sample.azimuth,
            snr: sample.snr,
            last_seen: sample.timestamp,
            history: VecDeque::new(),
            history_limit: None,
        })
    }

    /// Keep at most `limit` history points, dropping the oldest.
    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self.enforce_limit();
        self
    }

    /// Moves the current reading into the history and takes `sample` as the
    /// latest one.
    pub fn record_sample(&mut self, sample: SatelliteSample) -> Result<(), TrackError> {
        if !same_identity(&*self, &sample) {
            return Err(TrackError::IdentityMismatch {
                expected: self.id().to_string(),
                got: sample.id().to_string(),
            });
        }
        sample.validate()?;
        if sample.timestamp <= self.last_seen {
            return Err(TrackError::OutOfOrder {
                last_seen: self.last_seen,
                timestamp: sample.timestamp,
            });
        }

        self.history.push_back(HistoryPoint {
            timestamp: self.last_seen,
            elevation: self.elevation,
            azimuth: self.azimuth,
        });
        self.enforce_limit();

        self.elevation = sample.elevation;
        self.azimuth = sample.azimuth;
        self.snr = sample.snr;
        self.last_seen = sample.timestamp;
        Ok(())
    }

    /// Drops history points measured before `cutoff`. Returns how many went.
    pub fn prune_history_before(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.history.len();
        while self
            .history
            .front()
            .is_some_and(|point| point.timestamp < cutoff)
        {
            self.history.pop_front();
        }
        before - self.history.len()
    }

    fn enforce_limit(&mut self) {
        if let Some(limit) = self.history_limit {
            while self.history.len() > limit {
                self.history.pop_front();
            }
        }
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    pub fn snr(&self) -> f64 {
        self.snr
    }

    pub fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }

    pub fn history(&self) -> impl ExactSizeIterator<Item = &HistoryPoint> {
        self.history.iter()
    }
}

impl Identified for SatelliteTrack {
    fn prn_number(&self) -> u32 {
        self.prn_number
    }

    fn network(&self) -> &str {
        &self.network
    }
}
