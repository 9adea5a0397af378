//! The pedestrian agent and its type taxonomy.

use ped_core::{AgentId, GeoPoint, Vec2};
use ped_net::AccessNeed;

// ── AgentType ─────────────────────────────────────────────────────────────────

/// Closed pedestrian taxonomy.
///
/// Each variant is matched exhaustively at its four use sites (speed
/// factor, sensitivity band, avoidance radius, path accessibility), so
/// adding a variant is a compile-time checklist.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentType {
    #[default]
    Normal,
    Wheelchair,
    MobilityAid,
    Elderly,
    Child,
}

impl AgentType {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentType::Normal => "normal",
            AgentType::Wheelchair => "wheelchair",
            AgentType::MobilityAid => "mobility_aid",
            AgentType::Elderly => "elderly",
            AgentType::Child => "child",
        }
    }

    /// What this pedestrian demands of the sidewalk network.
    pub fn access_need(self) -> AccessNeed {
        match self {
            AgentType::Wheelchair => AccessNeed::Full,
            AgentType::MobilityAid => AccessNeed::Limited,
            AgentType::Normal | AgentType::Elderly | AgentType::Child => AccessNeed::Any,
        }
    }

    /// Personal-space radius in metres used by crowd avoidance.
    /// Wheelchair users need the widest berth; children the smallest.
    pub fn avoidance_radius_m(self) -> f64 {
        match self {
            AgentType::Wheelchair => 2.5,
            AgentType::MobilityAid => 2.0,
            AgentType::Elderly => 1.5,
            AgentType::Normal => 1.2,
            AgentType::Child => 0.8,
        }
    }

    /// Weather-sensitivity band `(lo, hi)` sampled at creation.  Mobility-
    /// restricted types draw from higher, narrower bands.
    pub fn sensitivity_band(self) -> (f64, f64) {
        match self {
            AgentType::Normal => (0.1, 0.5),
            AgentType::Wheelchair => (0.6, 0.8),
            AgentType::MobilityAid => (0.5, 0.8),
            AgentType::Elderly => (0.4, 0.8),
            AgentType::Child => (0.3, 0.7),
        }
    }
}

impl std::fmt::Display for AgentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── PedestrianAgent ───────────────────────────────────────────────────────────

/// One simulated pedestrian.
///
/// Owned exclusively by the engine's population; mutated every tick and
/// pruned once `at_destination` is set.  Speeds are metres/minute (the
/// caller-facing unit); the velocity vector is metres/second in the local
/// frame at `pos`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PedestrianAgent {
    pub id: AgentId,
    pub agent_type: AgentType,

    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub pos: GeoPoint,
    pub vel: Vec2,

    /// Planned polyline from the pathfinder, origin to destination inclusive.
    pub route: Vec<GeoPoint>,
    /// Cursor into `route`; non-decreasing.
    pub path_index: usize,

    /// Current (weather-adjusted) cruise speed, metres/minute.
    pub walking_speed_m_min: f64,
    /// Unmodified ceiling, metres/minute.  `walking_speed_m_min` never
    /// exceeds this after any weather or rush-hour adjustment.
    pub max_speed_m_min: f64,

    /// How strongly weather degrades this agent's speed, in [0, 1].
    pub weather_sensitivity: f64,
    /// Personal-space radius in metres.
    pub avoidance_radius_m: f64,

    /// Terminal flag: once set the agent is inert and eligible for removal.
    pub at_destination: bool,

    /// Simulation-clock seconds at the last kinematic update.
    pub updated_at_secs: f64,
}

impl PedestrianAgent {
    /// Cruise speed in metres/second.
    #[inline]
    pub fn walking_speed_mps(&self) -> f64 {
        self.walking_speed_m_min / 60.0
    }

    /// Speed ceiling in metres/second.
    #[inline]
    pub fn max_speed_mps(&self) -> f64 {
        self.max_speed_m_min / 60.0
    }

    /// The waypoint the agent is currently heading for.
    #[inline]
    pub fn waypoint(&self) -> Option<GeoPoint> {
        self.route.get(self.path_index).copied()
    }
}
