//! Area crowd metrics: density, speed, flow, and a congestion score.

use std::f64::consts::PI;

use ped_agent::PedestrianAgent;
use ped_core::GeoPoint;

/// Density above which a sidewalk counts as fully congested, people/m².
pub const MAX_COMFORTABLE_DENSITY: f64 = 5.0;

/// Free-flow walking speed used to normalise the speed term, m/min.
pub const MAX_WALK_SPEED_M_MIN: f64 = 80.0;

/// Aggregate state of the crowd inside a circular region.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrowdMetrics {
    /// People per square metre.
    pub density: f64,
    /// Mean instantaneous speed, metres/minute.
    pub average_speed_m_min: f64,
    /// People crossing a unit-width line per minute.
    pub flow_rate_per_min: f64,
    /// Congestion score in `[0, 1]`; 0 is free flow, 1 is gridlock.
    pub congestion: f64,
}

/// Metrics over the agents within `radius_m` of `center`.
///
/// An empty region yields all-zero metrics rather than NaN.
pub fn crowd_metrics(agents: &[PedestrianAgent], center: GeoPoint, radius_m: f64) -> CrowdMetrics {
    let inside: Vec<&PedestrianAgent> = agents
        .iter()
        .filter(|a| a.pos.distance_m(center) <= radius_m)
        .collect();
    if inside.is_empty() || radius_m <= 0.0 {
        return CrowdMetrics::default();
    }

    let area_m2 = PI * radius_m * radius_m;
    let density = inside.len() as f64 / area_m2;

    let avg_speed_mps =
        inside.iter().map(|a| a.vel.length()).sum::<f64>() / inside.len() as f64;
    let average_speed_m_min = avg_speed_mps * 60.0;

    // Fundamental diagram approximation: flow = density × speed.
    let flow_rate_per_min = density * avg_speed_mps * 60.0;

    let by_density = density / MAX_COMFORTABLE_DENSITY;
    let by_speed = 1.0 - average_speed_m_min / MAX_WALK_SPEED_M_MIN;
    let congestion = by_density.max(by_speed).clamp(0.0, 1.0);

    CrowdMetrics {
        density,
        average_speed_m_min,
        flow_rate_per_min,
        congestion,
    }
}
