use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use super::error::ProjectionError;
use super::geometry;
use super::observer::{GeoPosition, Observer};
use super::rotation;
use crate::constellation::ConstellationRegistry;
use crate::palette::Palette;
use crate::track::{Identified, SatelliteTrack};

/// Serialized as `[timestamp, [latitude, longitude]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailPoint {
    pub timestamp: String,
    pub position: GeoPosition,
}

impl Serialize for TrailPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (
            &self.timestamp,
            (self.position.latitude, self.position.longitude),
        )
            .serialize(serializer)
    }
}

/// Render-ready view of a track in the map frame of one reference time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedTrack {
    pub prn_number: u32,
    pub network: String,
    pub constellation: &'static str,
    pub elevation: f64,
    pub azimuth: f64,
    pub snr: f64,
    pub last_seen: String,
    pub latitude: f64,
    pub longitude: f64,
    pub color: String,
    pub altitude: f64,
    /// History oldest first, current position last.
    pub trail: Vec<TrailPoint>,
}

pub struct TrackProjector<'a> {
    registry: &'a ConstellationRegistry,
    palette: &'a Palette,
}

impl<'a> TrackProjector<'a> {
    pub fn new(registry: &'a ConstellationRegistry, palette: &'a Palette) -> Self {
        Self { registry, palette }
    }

    /// Projects the current reading and every history point, each rotated
    /// from its own measurement time to `reference_at`.
    pub fn project(
        &self,
        track: &SatelliteTrack,
        observer: &Observer,
        reference_at: DateTime<Utc>,
    ) -> Result<RenderedTrack, ProjectionError> {
        let altitude = self.registry.altitude_for_code(track.network());
        let constellation = self.registry.name_for_code(track.network());

        let locate = |azimuth: f64, elevation: f64, measured_at: DateTime<Utc>| {
            geometry::project(azimuth, elevation, altitude, observer)
                .map(|p| rotation::correct(p, measured_at, reference_at))
        };

        let current = locate(track.azimuth(), track.elevation(), track.last_seen())?;

        let mut trail = Vec::with_capacity(track.history().len() + 1);
        for point in track.history() {
            trail.push(TrailPoint {
                timestamp: format_timestamp(point.timestamp),
                position: locate(point.azimuth, point.elevation, point.timestamp)?,
            });
        }
        trail.push(TrailPoint {
            timestamp: format_timestamp(track.last_seen()),
            position: current,
        });

        Ok(RenderedTrack {
            prn_number: track.prn_number(),
            network: track.network().to_string(),
            constellation,
            elevation: track.elevation(),
            azimuth: track.azimuth(),
            snr: track.snr(),
            last_seen: format_timestamp(track.last_seen()),
            latitude: current.latitude,
            longitude: current.longitude,
            color: self.palette.color_for(constellation).to_string(),
            altitude,
            trail,
        })
    }

    /// Projects a snapshot of tracks, ordered by network then PRN.
    pub fn project_all(
        &self,
        tracks: &[SatelliteTrack],
        observer: &Observer,
        reference_at: DateTime<Utc>,
    ) -> Result<Vec<RenderedTrack>, ProjectionError> {
        let mut rendered = tracks
            .iter()
            .map(|t| self.project(t, observer, reference_at))
            .collect::<Result<Vec<_>, _>>()?;
        rendered.sort_by(|a, b| {
            a.network
                .cmp(&b.network)
                .then(a.prn_number.cmp(&b.prn_number))
        });
        Ok(rendered)
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constellation::UnknownNetworkCounter;
    use crate::track::{SatelliteSample, SkyView};
    use approx::assert_abs_diff_eq;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    const PALETTE: &str = r##"{
        "background": "#000", "foreground": "#fff", "admin0Border": "#111",
        "continentsBorder": "#222", "cities": "#333", "polarGrid": "#444",
        "satelliteNetworks": { "GPS": "#00ff00", "Unknown": "#ff00ff" }
    }"##;

    const LONDON: Observer = Observer {
        latitude_deg: 51.5,
        longitude_deg: -0.1,
    };

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
    }

    fn sample(network: &str, seconds: i64, elevation: f64, azimuth: f64) -> SatelliteSample {
        SatelliteSample {
            prn_number: 12,
            network: network.into(),
            elevation,
            azimuth,
            snr: 42.0,
            timestamp: t0() + Duration::seconds(seconds),
        }
    }

    fn fixtures() -> (ConstellationRegistry, Arc<UnknownNetworkCounter>, Palette) {
        let counter = Arc::new(UnknownNetworkCounter::new());
        let registry = ConstellationRegistry::new(counter.clone());
        (registry, counter, Palette::from_json(PALETTE).unwrap())
    }

    #[test]
    fn empty_history_gives_single_point_trail() {
        let (registry, _, palette) = fixtures();
        let projector = TrackProjector::new(&registry, &palette);
        let track = SatelliteTrack::new(sample("GP", 0, 45.0, 180.0)).unwrap();

        let rendered = projector.project(&track, &LONDON, t0()).unwrap();
        assert_eq!(rendered.trail.len(), 1);
        assert_eq!(rendered.trail[0].timestamp, "2025-03-14T12:00:00Z");
        assert_eq!(rendered.last_seen, "2025-03-14T12:00:00Z");
    }

    #[test]
    fn zero_elapsed_matches_direct_projection() {
        let (registry, _, palette) = fixtures();
        let projector = TrackProjector::new(&registry, &palette);
        let track = SatelliteTrack::new(sample("GP", 0, 45.0, 180.0)).unwrap();

        let rendered = projector.project(&track, &LONDON, t0()).unwrap();
        let direct = geometry::project(180.0, 45.0, 20.18, &LONDON).unwrap();
        assert_eq!(rendered.trail[0].position, direct);
        assert_eq!(rendered.latitude, direct.latitude);
        assert_eq!(rendered.longitude, direct.longitude);
        assert_eq!(rendered.color, "#00ff00");
        assert_eq!(rendered.altitude, 20.18);
        assert_eq!(rendered.constellation, "GPS");
    }

    #[test]
    fn an_hour_later_shifts_west_by_fifteen_degrees() {
        let (registry, _, palette) = fixtures();
        let projector = TrackProjector::new(&registry, &palette);
        let track = SatelliteTrack::new(sample("GP", 0, 45.0, 180.0)).unwrap();

        let now = projector.project(&track, &LONDON, t0()).unwrap();
        let later = projector
            .project(&track, &LONDON, t0() + Duration::seconds(3600))
            .unwrap();
        assert_abs_diff_eq!(later.longitude - now.longitude, -15.041068625, epsilon = 1e-9);
        assert_abs_diff_eq!(later.latitude, now.latitude, epsilon = 1e-12);
    }

    #[test]
    fn history_points_rotate_from_their_own_time() {
        let (registry, _, palette) = fixtures();
        let projector = TrackProjector::new(&registry, &palette);
        let mut track = SatelliteTrack::new(sample("GP", 0, 30.0, 90.0)).unwrap();
        track.record_sample(sample("GP", 60, 31.0, 91.0)).unwrap();
        track.record_sample(sample("GP", 120, 32.0, 92.0)).unwrap();

        let reference = t0() + Duration::seconds(120);
        let rendered = projector.project(&track, &LONDON, reference).unwrap();
        assert_eq!(rendered.trail.len(), 3);

        let first = rotation::correct(
            geometry::project(90.0, 30.0, 20.18, &LONDON).unwrap(),
            t0(),
            reference,
        );
        let second = rotation::correct(
            geometry::project(91.0, 31.0, 20.18, &LONDON).unwrap(),
            t0() + Duration::seconds(60),
            reference,
        );
        assert_eq!(rendered.trail[0].position, first);
        assert_eq!(rendered.trail[1].position, second);
        assert_eq!(rendered.trail[1].timestamp, "2025-03-14T12:01:00Z");

        let last = rendered.trail.last().unwrap();
        assert_eq!(last.timestamp, rendered.last_seen);
        assert_eq!(last.position.longitude, rendered.longitude);
    }

    #[test]
    fn unknown_network_uses_defaults() {
        let (registry, counter, palette) = fixtures();
        let projector = TrackProjector::new(&registry, &palette);
        let mut track = SatelliteTrack::new(sample("XX", 0, 45.0, 180.0)).unwrap();
        track.record_sample(sample("XX", 10, 46.0, 180.0)).unwrap();

        let rendered = projector.project(&track, &LONDON, t0()).unwrap();
        assert_eq!(rendered.altitude, 21.0);
        assert_eq!(rendered.color, "#ff00ff");
        assert_eq!(rendered.constellation, "Unknown");
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn named_network_without_colour_falls_back() {
        let (registry, counter, palette) = fixtures();
        let projector = TrackProjector::new(&registry, &palette);
        let track = SatelliteTrack::new(sample("GL", 0, 45.0, 180.0)).unwrap();

        let rendered = projector.project(&track, &LONDON, t0()).unwrap();
        assert_eq!(rendered.color, "#ff00ff");
        assert_eq!(rendered.altitude, 19.13);
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn project_all_orders_by_network_then_prn() {
        let (registry, _, palette) = fixtures();
        let projector = TrackProjector::new(&registry, &palette);
        let mut a = sample("GP", 0, 45.0, 180.0);
        a.prn_number = 20;
        let b = sample("GP", 0, 45.0, 180.0);
        let c = sample("GA", 0, 45.0, 180.0);
        let tracks: Vec<_> = [a, b, c]
            .into_iter()
            .map(|s| SatelliteTrack::new(s).unwrap())
            .collect();

        let rendered = projector.project_all(&tracks, &LONDON, t0()).unwrap();
        let order: Vec<_> = rendered
            .iter()
            .map(|r| (r.network.as_str(), r.prn_number))
            .collect();
        assert_eq!(order, vec![("GA", 12), ("GP", 12), ("GP", 20)]);
    }

    #[test]
    fn serializes_camel_case_record() {
        let (registry, _, palette) = fixtures();
        let projector = TrackProjector::new(&registry, &palette);
        let track = SatelliteTrack::new(sample("GP", 0, 45.0, 180.0)).unwrap();
        let rendered = projector.project(&track, &LONDON, t0()).unwrap();

        let json = serde_json::to_value(&rendered).unwrap();
        assert_eq!(json["prnNumber"], 12);
        assert_eq!(json["lastSeen"], "2025-03-14T12:00:00Z");
        assert_eq!(json["trail"][0][0], "2025-03-14T12:00:00Z");
        assert_eq!(json["trail"][0][1][0], rendered.latitude);
        assert_eq!(json["trail"][0][1][1], rendered.longitude);
    }

    #[test]
    fn grazing_track_does_not_block_the_rest() {
        let (registry, _, palette) = fixtures();
        let projector = TrackProjector::new(&registry, &palette);
        let mut sky = SkyView::default();
        let mut high = sample("GP", 0, 45.0, 180.0);
        high.prn_number = 1;
        let mut grazing = sample("GP", 0, 1e-8, 10.0);
        grazing.prn_number = 2;
        sky.ingest(high).unwrap();
        sky.ingest(grazing).unwrap();

        let rendered = projector.project_all(sky.tracks(), &LONDON, t0()).unwrap();
        assert_eq!(rendered.len(), 2);
        assert!(rendered[1].latitude.is_finite());
        assert!(rendered[1].longitude.is_finite());
    }
}
