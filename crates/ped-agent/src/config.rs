//! The full simulation parameter bundle.
//!
//! Supplied once at engine construction; effectively immutable afterwards
//! except for the weather sub-field, which the engine may replace mid-run.

use ped_net::SidewalkNetwork;

use crate::{AgentType, WeatherConditions};

// ── CrowdParams ───────────────────────────────────────────────────────────────

/// Force-model parameters for the crowd dynamics system.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrowdParams {
    /// Neighbours inside this radius repel (metres).
    pub separation_radius_m: f64,
    /// Neighbours inside this radius contribute to velocity matching.
    pub alignment_radius_m: f64,
    /// Neighbours inside this radius attract toward the local centroid.
    pub cohesion_radius_m: f64,
    /// Magnitude ceiling for any single steering force (m/s²).
    pub max_force: f64,
    /// Weight applied to the obstacle-avoidance force when combining.
    pub avoidance_strength: f64,
}

impl Default for CrowdParams {
    fn default() -> Self {
        Self {
            separation_radius_m: 2.0,
            alignment_radius_m: 5.0,
            cohesion_radius_m: 8.0,
            max_force: 2.0,
            avoidance_strength: 1.5,
        }
    }
}

// ── AccessibilityFactors ──────────────────────────────────────────────────────

/// Per-type speed multipliers applied to the base speed draw.
/// `Normal` is implicitly 1.0; all others are below it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessibilityFactors {
    pub wheelchair: f64,
    pub mobility_aid: f64,
    pub elderly: f64,
    pub child: f64,
}

impl Default for AccessibilityFactors {
    fn default() -> Self {
        Self {
            wheelchair: 0.70,
            mobility_aid: 0.75,
            elderly: 0.80,
            child: 0.85,
        }
    }
}

impl AccessibilityFactors {
    pub fn factor(&self, agent_type: AgentType) -> f64 {
        match agent_type {
            AgentType::Normal => 1.0,
            AgentType::Wheelchair => self.wheelchair,
            AgentType::MobilityAid => self.mobility_aid,
            AgentType::Elderly => self.elderly,
            AgentType::Child => self.child,
        }
    }
}

// ── PedSimConfig ──────────────────────────────────────────────────────────────

/// Everything the engine needs to run a pedestrian simulation session.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PedSimConfig {
    /// Hard cap on the live population.
    pub max_agents: usize,
    /// Default tick length in seconds for callers that don't supply one.
    pub time_step_secs: f64,
    pub crowd: CrowdParams,
    pub access: AccessibilityFactors,
    pub weather: WeatherConditions,
    /// Sidewalk topology.  Left empty, the engine auto-generates a stop-
    /// centred proxy network.  Not serialized (the R-tree is rebuilt from
    /// source data, never round-tripped).
    #[cfg_attr(feature = "serde", serde(skip))]
    pub network: SidewalkNetwork,
}

impl PedSimConfig {
    /// Reasonable interactive defaults with the given agent cap.
    pub fn with_max_agents(max_agents: usize) -> Self {
        Self {
            max_agents,
            time_step_secs: 1.0,
            ..Default::default()
        }
    }
}
