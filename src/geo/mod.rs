//! Geographic helpers used by the game logic.
//!
//! Everything here is a pure function over plain coordinates. Randomness is
//! injected by the caller so tests can seed it.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine distance, in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_367_000.0;

/// A point in decimal degrees.
///
/// Latitude is expected in `[-90, 90]` and longitude in `[-180, 180]`; this
/// is assumed by callers and not checked here.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// The lat/lon box a target may be hidden in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingRectangle {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingRectangle {
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// Rough corners of Hyde Park, London, with the west edge pulled in to
    /// stay clear of Kensington Palace.
    pub fn hyde_park() -> Self {
        Self::new(
            convert_dms(51.0, 30.0, 11.0, false),
            convert_dms(51.0, 30.0, 35.0, false),
            convert_dms(0.0, 11.0, 0.0, true),
            convert_dms(0.0, 9.0, 33.0, true),
        )
    }
}

impl Default for BoundingRectangle {
    fn default() -> Self {
        Self::hyde_park()
    }
}

/// Convert degree/minute/second notation into decimal degrees.
///
/// `negate` flips the sign for southern latitudes and western longitudes.
///
/// ```rust
/// use treasure_hunt::geo::convert_dms;
///
/// let lat = convert_dms(51.0, 30.0, 11.0, false);
/// assert!((lat - 51.50306).abs() < 1e-5);
/// ```
pub fn convert_dms(degrees: f64, minutes: f64, seconds: f64, negate: bool) -> f64 {
    let sign = if negate { -1.0 } else { 1.0 };
    sign * (degrees + minutes / 60.0 + seconds / 3600.0)
}

/// Great-circle distance between two points in metres (haversine).
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = b.longitude.to_radians() - a.longitude.to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_METERS * c
}

/// Sample a point uniformly in lat/lon space inside `rect`.
///
/// The axes are drawn independently, so this is uniform over the rectangle
/// in degrees rather than over the Earth's surface.
pub fn random_point_in_rectangle<R: Rng + ?Sized>(rect: &BoundingRectangle, rng: &mut R) -> Coordinate {
    Coordinate {
        latitude: rng.random_range(rect.lat_min..=rect.lat_max),
        longitude: rng.random_range(rect.lon_min..=rect.lon_max),
    }
}

/// Inclusive containment test on both axes.
pub fn in_bounds(coord: Coordinate, rect: &BoundingRectangle) -> bool {
    coord.latitude >= rect.lat_min
        && coord.latitude <= rect.lat_max
        && coord.longitude >= rect.lon_min
        && coord.longitude <= rect.lon_max
}
