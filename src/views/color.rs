//! Speed colour scales for the map track

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::constants::FIXED_SPEED_DOMAIN_KMH;

/// An sRGB colour, displayed and serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Colour ramps available for the speed track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Palette {
    /// Perceptually uniform dark purple to yellow
    Viridis,
    /// Linear green (slow) to red (fast)
    GreenRed,
}

// Viridis sampled at nine evenly spaced stops
const VIRIDIS_STOPS: [Rgb; 9] = [
    Rgb(0x44, 0x01, 0x54),
    Rgb(0x47, 0x2d, 0x7b),
    Rgb(0x3b, 0x52, 0x8b),
    Rgb(0x2c, 0x72, 0x8e),
    Rgb(0x21, 0x91, 0x8c),
    Rgb(0x28, 0xae, 0x80),
    Rgb(0x5e, 0xc9, 0x62),
    Rgb(0xad, 0xdc, 0x30),
    Rgb(0xfd, 0xe7, 0x25),
];

const GREEN_RED_STOPS: [Rgb; 2] = [Rgb(0, 255, 0), Rgb(255, 0, 0)];

impl Palette {
    fn stops(&self) -> &'static [Rgb] {
        match self {
            Palette::Viridis => &VIRIDIS_STOPS,
            Palette::GreenRed => &GREEN_RED_STOPS,
        }
    }

    /// Colour at position `t` in `[0, 1]`; out-of-range input is clamped
    pub fn sample(&self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };

        let scaled = t * (stops.len() - 1) as f64;
        let lower = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = scaled - lower as f64;
        lerp(stops[lower], stops[lower + 1], frac)
    }
}

fn lerp(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Rgb(
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}

/// Linear map from a speed domain onto a palette
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedColorScale {
    pub min: f64,
    pub max: f64,
    pub palette: Palette,
}

impl SpeedColorScale {
    pub fn fixed(min: f64, max: f64, palette: Palette) -> Self {
        Self { min, max, palette }
    }

    /// Domain spanning the finite speeds given, `None` if there are none
    pub fn from_speeds(speeds: impl IntoIterator<Item = f64>, palette: Palette) -> Option<Self> {
        let (min, max) = speeds
            .into_iter()
            .filter(|speed| speed.is_finite())
            .fold(None, |range: Option<(f64, f64)>, speed| match range {
                None => Some((speed, speed)),
                Some((min, max)) => Some((min.min(speed), max.max(speed))),
            })?;
        Some(Self { min, max, palette })
    }

    /// Position of `speed` in the domain, clamped to `[0, 1]`
    ///
    /// An empty domain or an absent speed maps to 0.
    pub fn normalize(&self, speed: f64) -> f64 {
        let span = self.max - self.min;
        if !speed.is_finite() || span <= 0.0 {
            return 0.0;
        }
        ((speed - self.min) / span).clamp(0.0, 1.0)
    }

    pub fn color(&self, speed: f64) -> Rgb {
        self.palette.sample(self.normalize(speed))
    }
}

impl Default for SpeedColorScale {
    fn default() -> Self {
        let (min, max) = FIXED_SPEED_DOMAIN_KMH;
        Self::fixed(min, max, Palette::GreenRed)
    }
}
