//! Transit route geometry and stop metadata.

use ped_core::{GeoPoint, TravelMode};

use crate::{EngineError, EngineResult};

// ── RouteSegment ──────────────────────────────────────────────────────────────

/// One transit line's geometry: a named polyline of at least two points.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSegment {
    pub name: String,
    pub mode: TravelMode,
    pub points: Vec<GeoPoint>,
    /// Display colour, `#rrggbb`.  Purely cosmetic.
    pub color: String,
}

impl RouteSegment {
    /// A polyline with fewer than two points has no extent and is rejected.
    pub fn new(
        name: impl Into<String>,
        mode: TravelMode,
        points: Vec<GeoPoint>,
    ) -> EngineResult<Self> {
        let name = name.into();
        if points.len() < 2 {
            return Err(EngineError::MalformedRoute {
                name,
                points: points.len(),
            });
        }
        Ok(Self {
            name,
            mode,
            points,
            color: "#3388ff".to_string(),
        })
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sum of the great-circle lengths of the polyline's segments.
    pub fn length_m(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance_m(w[1]))
            .sum()
    }
}

// ── TransitStop ───────────────────────────────────────────────────────────────

/// A boarding point served by one or more routes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitStop {
    pub name: String,
    pub location: GeoPoint,
    /// Names of the [`RouteSegment`]s calling at this stop.
    pub routes: Vec<String>,
    pub mode: TravelMode,
}

impl TransitStop {
    pub fn new(name: impl Into<String>, location: GeoPoint, mode: TravelMode) -> Self {
        Self {
            name: name.into(),
            location,
            routes: Vec::new(),
            mode,
        }
    }

    pub fn with_routes(mut self, routes: Vec<String>) -> Self {
        self.routes = routes;
        self
    }

    pub fn serves(&self, route_name: &str) -> bool {
        self.routes.iter().any(|r| r == route_name)
    }
}
