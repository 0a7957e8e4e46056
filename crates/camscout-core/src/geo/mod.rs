//! Geographic coordinates and free-text coordinate extraction.
//!
//! Users type coordinates by hand ("55.7558, 37.6173", "lat: 12.3 lng: -4.5"),
//! so the parser is loose about separators and labels but rejects pairs that
//! fall outside the globe.


use crate::error::ParseError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Valid latitude range in degrees.
pub const LAT_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
/// Valid longitude range in degrees.
pub const LNG_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint", into = "RawPoint")]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

#[derive(Serialize, Deserialize)]
struct RawPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Build a point, rejecting the pair as a unit if either value is off the globe.
    pub fn new(lat: f64, lng: f64) -> Result<Self, ParseError> {
        if !LAT_RANGE.contains(&lat) || !LNG_RANGE.contains(&lng) {
            return Err(ParseError::OutOfRange { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

impl TryFrom<RawPoint> for GeoPoint {
    type Error = ParseError;

    fn try_from(raw: RawPoint) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl From<GeoPoint> for RawPoint {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: point.lat,
            longitude: point.lng,
        }
    }
}

/// Two signed, optionally fractional numbers separated by anything that is
/// not part of a number.
fn pair_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"([-+]?(?:[0-9]*\.[0-9]+|[0-9]+))[^0-9+\-.]+([-+]?(?:[0-9]*\.[0-9]+|[0-9]+))")
            .expect("coordinate pattern is valid")
    })
}

fn parse_token(token: &str) -> Result<f64, ParseError> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseError::InvalidNumber {
            token: token.to_string(),
        }),
    }
}

/// Extract the first numeric pair in `text` as (latitude, longitude).
///
/// Labels are not interpreted: "lng 30 lat 50" yields latitude 30.
pub fn parse_coordinates(text: &str) -> Result<GeoPoint, ParseError> {
    let caps = pair_regex().captures(text).ok_or(ParseError::NoMatch)?;
    let (lat_token, lng_token) = match (caps.get(1), caps.get(2)) {
        (Some(lat), Some(lng)) => (lat.as_str(), lng.as_str()),
        _ => return Err(ParseError::NoMatch),
    };

    let lat = parse_token(lat_token)?;
    let lng = parse_token(lng_token)?;
    GeoPoint::new(lat, lng)
}
