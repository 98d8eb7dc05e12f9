use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use super::error::TrackError;
use super::identity::{same_identity, Identified};
use super::sample::SatelliteSample;
use super::track::SatelliteTrack;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RetentionPolicy {
    /// Upper bound on history points per track.
    pub max_history: Option<usize>,
    /// History points and whole tracks older than this are dropped on prune.
    pub max_age: Option<Duration>,
}

/// Every satellite seen so far, owned by the ingestion loop.
#[derive(Debug, Clone, Default)]
pub struct SkyView {
    tracks: Vec<SatelliteTrack>,
    retention: RetentionPolicy,
}

impl SkyView {
    pub fn new(retention: RetentionPolicy) -> Self {
        Self {
            tracks: Vec::new(),
            retention,
        }
    }

    /// Updates the matching track or starts a new one.
    pub fn ingest(&mut self, sample: SatelliteSample) -> Result<(), TrackError> {
        match self.tracks.iter().position(|t| same_identity(t, &sample)) {
            Some(index) => self.tracks[index].record_sample(sample),
            None => {
                let track =
                    SatelliteTrack::new(sample)?.with_history_limit(self.retention.max_history);
                log::debug!("New satellite {}", track.id());
                self.tracks.push(track);
                Ok(())
            }
        }
    }

    /// Applies the age limit relative to `now`. Returns the number of tracks
    /// removed.
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let Some(max_age) = self.retention.max_age else {
            return 0;
        };
        let cutoff = now - max_age;

        let before = self.tracks.len();
        self.tracks.retain(|t| t.last_seen() >= cutoff);
        let removed = before - self.tracks.len();

        let mut trimmed = 0;
        for track in &mut self.tracks {
            trimmed += track.prune_history_before(cutoff);
        }

        if removed > 0 || trimmed > 0 {
            log::debug!(
                "Pruned {} satellites and {} history points older than {}",
                removed,
                trimmed,
                cutoff
            );
        }
        removed
    }

    pub fn tracks(&self) -> &[SatelliteTrack] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Timestamp of the most recent sample across all tracks.
    pub fn newest_sample(&self) -> Option<DateTime<Utc>> {
        self.tracks.iter().map(|t| t.last_seen()).max()
    }
}

/// Sky view shared between the single writer and any number of renderers.
/// Readers never project against live tracks, only against a snapshot.
#[derive(Debug, Clone, Default)]
pub struct SharedSky {
    inner: Arc<Mutex<SkyView>>,
}

impl SharedSky {
    pub fn new(retention: RetentionPolicy) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SkyView::new(retention))),
        }
    }

    pub fn ingest(&self, sample: SatelliteSample) -> Result<(), TrackError> {
        self.lock().ingest(sample)
    }

    pub fn prune(&self, now: DateTime<Utc>) -> usize {
        self.lock().prune(now)
    }

    pub fn snapshot(&self) -> Vec<SatelliteTrack> {
        self.lock().tracks().to_vec()
    }

    pub fn newest_sample(&self) -> Option<DateTime<Utc>> {
        self.lock().newest_sample()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SkyView> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::thread;

    fn t(seconds: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap() + Duration::seconds(seconds)
    }

    fn sample(prn_number: u32, network: &str, seconds: i64) -> SatelliteSample {
        SatelliteSample {
            prn_number,
            network: network.into(),
            elevation: 30.0,
            azimuth: 120.0,
            snr: 35.0,
            timestamp: t(seconds),
        }
    }

    #[test]
    fn same_prn_on_different_networks_are_separate_tracks() {
        let mut sky = SkyView::default();
        sky.ingest(sample(12, "GP", 0)).unwrap();
        sky.ingest(sample(12, "GL", 0)).unwrap();
        sky.ingest(sample(12, "GP", 10)).unwrap();

        assert_eq!(sky.len(), 2);
        let gps = sky.tracks().iter().find(|t| t.network() == "GP").unwrap();
        assert_eq!(gps.history().len(), 1);
        assert_eq!(gps.last_seen(), t(10));
    }

    #[test]
    fn out_of_order_sample_is_rejected() {
        let mut sky = SkyView::default();
        sky.ingest(sample(3, "GA", 10)).unwrap();
        assert!(matches!(
            sky.ingest(sample(3, "GA", 5)),
            Err(TrackError::OutOfOrder { .. })
        ));
        assert_eq!(sky.tracks()[0].last_seen(), t(10));
    }

    #[test]
    fn history_bounded_by_policy() {
        let mut sky = SkyView::new(RetentionPolicy {
            max_history: Some(3),
            max_age: None,
        });
        for s in 0..10 {
            sky.ingest(sample(1, "GP", s)).unwrap();
        }
        assert_eq!(sky.tracks()[0].history().len(), 3);
    }

    #[test]
    fn prune_drops_stale_tracks_and_points() {
        let mut sky = SkyView::new(RetentionPolicy {
            max_history: None,
            max_age: Some(Duration::seconds(60)),
        });
        sky.ingest(sample(1, "GP", 0)).unwrap();
        sky.ingest(sample(2, "GP", 0)).unwrap();
        sky.ingest(sample(2, "GP", 50)).unwrap();
        sky.ingest(sample(2, "GP", 100)).unwrap();

        assert_eq!(sky.prune(t(100)), 1);
        assert_eq!(sky.len(), 1);
        let stamps: Vec<_> = sky.tracks()[0].history().map(|p| p.timestamp).collect();
        assert_eq!(stamps, vec![t(50)]);
    }

    #[test]
    fn prune_without_age_limit_keeps_everything() {
        let mut sky = SkyView::default();
        sky.ingest(sample(1, "GP", 0)).unwrap();
        assert_eq!(sky.prune(t(1_000_000)), 0);
        assert_eq!(sky.len(), 1);
    }

    #[test]
    fn snapshot_is_detached_from_writer() {
        let sky = SharedSky::default();
        sky.ingest(sample(5, "GA", 0)).unwrap();
        let snapshot = sky.snapshot();

        sky.ingest(sample(5, "GA", 10)).unwrap();
        assert_eq!(snapshot[0].last_seen(), t(0));
        assert_eq!(snapshot[0].history().len(), 0);
        assert_eq!(sky.newest_sample(), Some(t(10)));
    }

    #[test]
    fn readers_and_writer_run_concurrently() {
        let sky = SharedSky::default();
        let writer = {
            let sky = sky.clone();
            thread::spawn(move || {
                for s in 0..200 {
                    sky.ingest(sample(9, "GP", s)).unwrap();
                }
            })
        };
        let reader = {
            let sky = sky.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    for track in sky.snapshot() {
                        assert!(track.history().all(|p| p.timestamp < track.last_seen()));
                    }
                }
            })
        };
        writer.join().unwrap();
        reader.join().unwrap();
        assert_eq!(sky.snapshot()[0].history().len(), 199);
    }
}
