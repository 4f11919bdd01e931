//! Strongly-typed geographic primitives (zero-cost newtypes).
//!
//! - Points are `(longitude, latitude)` in decimal degrees, x before y
//! - Distances are nautical miles, converted to feet only at the output edge
//! - Bounding boxes are plain inclusive lat/lon rectangles, not geodesic

use std::fmt;
use std::str::FromStr;

use glam::{DVec2, dvec2};

use crate::errors::ConfigError;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is negative when a distance was expected
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Reject NaN and infinities.
#[inline]
pub fn finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Feet per nautical mile
pub const FEET_PER_NM: f64 = 6076.12;

/// Distance in nautical miles
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct NauticalMiles(pub f64);

impl NauticalMiles {
    pub const ZERO: NauticalMiles = NauticalMiles(0.0);

    /// Create a distance with validation (rejects NaN, infinite and negative)
    #[inline]
    pub fn try_new(val: f64) -> Result<NauticalMiles, NumericError> {
        let val = finite(val)?;
        if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(NauticalMiles(val))
        }
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn to_feet(self) -> f64 {
        self.0 * FEET_PER_NM
    }
}

impl fmt::Display for NauticalMiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} NM", self.0)
    }
}

/// Round `value` to `decimals` places, half away from zero.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}

/// A geographic point stored as `x = longitude`, `y = latitude` (degrees).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[repr(transparent)]
pub struct LonLat(pub DVec2);

impl LonLat {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        LonLat(dvec2(lon, lat))
    }

    #[inline]
    pub fn lon(self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn lat(self) -> f64 {
        self.0.y
    }

    /// Round longitude and latitude independently.
    #[inline]
    pub fn quantize(self, lon_decimals: i32, lat_decimals: i32) -> Self {
        LonLat::new(round_to(self.lon(), lon_decimals), round_to(self.lat(), lat_decimals))
    }

    /// `[lon, lat]` position as used by GeoJSON
    #[inline]
    pub fn to_position(self) -> Vec<f64> {
        vec![self.lon(), self.lat()]
    }
}

impl From<LonLat> for DVec2 {
    fn from(p: LonLat) -> DVec2 {
        p.0
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lon(), self.lat())
    }
}

/// Inclusive rectangular area filter in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub north: f64,
    pub west: f64,
    pub south: f64,
    pub east: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::WORLD
    }
}

impl BoundingBox {
    pub const WORLD: BoundingBox = BoundingBox {
        north: 90.0,
        west: -180.0,
        south: -90.0,
        east: 180.0,
    };

    /// Build from the north-west and south-east corners.
    pub fn from_corners(north: f64, west: f64, south: f64, east: f64) -> Result<Self, ConfigError> {
        for (name, value) in [("north", north), ("west", west), ("south", south), ("east", east)] {
            finite(value).map_err(|source| ConfigError::InvalidCorner { name, source })?;
        }
        if !(-90.0..=90.0).contains(&north) || !(-90.0..=90.0).contains(&south) {
            return Err(ConfigError::LatitudeOutOfRange { north, south });
        }
        if !(-180.0..=180.0).contains(&west) || !(-180.0..=180.0).contains(&east) {
            return Err(ConfigError::LongitudeOutOfRange { west, east });
        }
        if south >= north || west >= east {
            return Err(ConfigError::InvertedBounds {
                north,
                west,
                south,
                east,
            });
        }
        Ok(Self {
            north,
            west,
            south,
            east,
        })
    }

    #[inline]
    pub fn contains(&self, p: LonLat) -> bool {
        p.lat() <= self.north && p.lat() >= self.south && p.lon() >= self.west && p.lon() <= self.east
    }
}

/// Parses the `"N W S E"` corner form, e.g. `"50 -131 23 -66"`.
impl FromStr for BoundingBox {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(|tok| {
                tok.parse::<f64>().map_err(|_| ConfigError::MalformedBounds {
                    input: s.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        match values.as_slice() {
            [n, w, so, e] => Self::from_corners(*n, *w, *so, *e),
            _ => Err(ConfigError::MalformedBounds {
                input: s.to_string(),
            }),
        }
    }
}

/// 8-bit RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const PURPLE: Rgb = Rgb(128, 0, 128);
    pub const MAGENTA: Rgb = Rgb(255, 0, 128);
    pub const BLUE: Rgb = Rgb(0, 64, 128);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.0, self.1, self.2)
    }
}
