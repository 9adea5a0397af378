//! Geographic coordinate type and the local tangent-plane projection.
//!
//! `GeoPoint` stores `f64` latitude/longitude.  The simulation resolves
//! metre-scale geometry (2 m waypoint thresholds, ~1.5 m personal-space
//! radii), which sits below single-precision lat/lon resolution, so all
//! coordinate math is double-precision.

use crate::Vec2;

/// Metres per degree of latitude (spherical approximation).
pub const METERS_PER_DEG_LAT: f64 = 110_540.0;

/// Metres per degree of longitude at the equator; scale by `cos(lat)`.
pub const METERS_PER_DEG_LON: f64 = 111_320.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Mean Earth radius 6 371 000 m, no ellipsoidal correction.  Used for
    /// every proximity check, route-length sum, and crowd-area query.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        const R: f64 = 6_371_000.0;

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── LocalFrame ────────────────────────────────────────────────────────────────

/// Equirectangular projection centred on an arbitrary origin.
///
/// Maps geographic coordinates to a metre-based x/y plane (x east, y north)
/// for vector arithmetic — forces, headings, short offsets.  The projection
/// is only valid within a few kilometres of the origin; flocking and
/// avoidance ranges are tens of metres, well inside that envelope.
#[derive(Copy, Clone, Debug)]
pub struct LocalFrame {
    origin: GeoPoint,
    /// cos(origin latitude), cached for the lon↔metres conversion.
    cos_lat: f64,
}

impl LocalFrame {
    #[inline]
    pub fn new(origin: GeoPoint) -> Self {
        Self {
            origin,
            cos_lat: origin.lat.to_radians().cos(),
        }
    }

    #[inline]
    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// Project `p` into frame-local metres.
    #[inline]
    pub fn to_local(&self, p: GeoPoint) -> Vec2 {
        Vec2::new(
            (p.lon - self.origin.lon) * METERS_PER_DEG_LON * self.cos_lat,
            (p.lat - self.origin.lat) * METERS_PER_DEG_LAT,
        )
    }

    /// Inverse of [`to_local`](Self::to_local): frame-local metres back to a
    /// geographic coordinate.
    #[inline]
    pub fn from_local(&self, v: Vec2) -> GeoPoint {
        GeoPoint::new(
            self.origin.lat + v.y / METERS_PER_DEG_LAT,
            self.origin.lon + v.x / (METERS_PER_DEG_LON * self.cos_lat),
        )
    }
}
