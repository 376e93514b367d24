//! Speed-coloured track for the map view

use serde::Serialize;

use super::color::{Rgb, SpeedColorScale};
use super::hover::{HoverHit, nearest_point};
use crate::config::MapConfig;
use crate::constants::FIXED_SPEED_DOMAIN_KMH;
use crate::dataset::Dataset;
use crate::models::GpsPoint;

/// Line between two consecutive GPS-valid records
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackSegment {
    pub start: GpsPoint,
    pub end: GpsPoint,
    /// Speed at the segment start, which sets its colour
    pub speed: f64,
    pub color: Rgb,
}

/// One entry of the speed legend
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendStop {
    pub speed: f64,
    pub color: Rgb,
}

/// Bounding box of the track
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl Bounds {
    fn extend(self, point: &GpsPoint) -> Self {
        Self {
            min_lat: self.min_lat.min(point.lat),
            min_lon: self.min_lon.min(point.lon),
            max_lat: self.max_lat.max(point.lat),
            max_lon: self.max_lon.max(point.lon),
        }
    }

    fn of(point: &GpsPoint) -> Self {
        Self {
            min_lat: point.lat,
            min_lon: point.lon,
            max_lat: point.lat,
            max_lon: point.lon,
        }
    }
}

/// Everything the map needs to draw one dataset
#[derive(Debug, Clone, Serialize)]
pub struct TrackView {
    pub scale: SpeedColorScale,
    pub segments: Vec<TrackSegment>,
    pub legend: Vec<LegendStop>,
    pub bounds: Option<Bounds>,
    pub last_position: Option<GpsPoint>,
    #[serde(skip)]
    points: Vec<GpsPoint>,
    #[serde(skip)]
    hover_radius_m: f64,
}

impl TrackView {
    pub fn build(dataset: &Dataset, config: &MapConfig) -> Self {
        let points: Vec<GpsPoint> = dataset.gps_points().collect();

        let scale = match config.speed_domain {
            Some((min, max)) => SpeedColorScale::fixed(min, max, config.palette),
            None => SpeedColorScale::from_speeds(points.iter().map(|p| p.speed), config.palette)
                .unwrap_or_else(|| {
                    let (min, max) = FIXED_SPEED_DOMAIN_KMH;
                    SpeedColorScale::fixed(min, max, config.palette)
                }),
        };

        let segments = points
            .windows(2)
            .map(|pair| TrackSegment {
                start: pair[0],
                end: pair[1],
                speed: pair[0].speed,
                color: scale.color(pair[0].speed),
            })
            .collect();

        let bounds = points
            .split_first()
            .map(|(first, rest)| rest.iter().fold(Bounds::of(first), Bounds::extend));

        Self {
            scale,
            segments,
            legend: legend(&scale, config.legend_steps),
            bounds,
            last_position: points.last().copied(),
            points,
            hover_radius_m: config.hover_radius_m,
        }
    }

    /// GPS-valid points in file order
    pub fn points(&self) -> &[GpsPoint] {
        &self.points
    }

    /// Point under the pointer within the configured hover radius
    pub fn hover(&self, lat: f64, lon: f64) -> Option<HoverHit> {
        nearest_point(self.points.iter().copied(), lat, lon, self.hover_radius_m)
    }
}

/// `steps + 1` evenly spaced stops from the scale minimum to its maximum
pub fn legend(scale: &SpeedColorScale, steps: usize) -> Vec<LegendStop> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let speed = scale.min + (scale.max - scale.min) * (i as f64 / steps as f64);
            LegendStop {
                speed,
                color: scale.color(speed),
            }
        })
        .collect()
}
