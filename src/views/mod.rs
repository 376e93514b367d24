//! Data preparation for the map and chart collaborators
//!
//! Nothing here draws. These modules turn a [`Dataset`](crate::dataset::Dataset)
//! into the shapes a map or plotting component consumes:
//!
//! - [`color`] - Speed-to-colour scales and palettes
//! - [`track`] - Speed-coloured track segments, legend, bounds and last position
//! - [`hover`] - Nearest GPS point under the pointer
//! - [`series`] - Numeric fields against time for line charts

pub mod color;
pub mod hover;
pub mod series;
pub mod track;

pub use color::{Palette, Rgb, SpeedColorScale};
pub use hover::{HoverHit, haversine_meters, nearest_point};
pub use series::{CHART_FIELDS, ChartField, Series, series, y_domain};
pub use track::{Bounds, LegendStop, TrackSegment, TrackView};
