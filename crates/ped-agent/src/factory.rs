//! Stochastic pedestrian generation and per-step kinematic integration.

use std::f64::consts::TAU;

use ped_core::{AgentId, GeoPoint, LocalFrame, SimRng, Vec2};

use crate::{AccessibilityFactors, AgentType, PedSimConfig, PedestrianAgent, WeatherConditions};

/// Base walking-speed draw in metres/minute (≈ 3–5 mph) before type and
/// weather adjustment.
pub const BASE_SPEED_M_MIN: std::ops::Range<f64> = 80.0..134.0;

/// Probability that a stop-centric trip ends at the stop itself (the rest
/// end at another nearby sample).
const STOP_DESTINATION_SHARE: f64 = 0.7;

/// Rush hour scales walking and max speed uniformly by this factor.
const RUSH_HOUR_FACTOR: f64 = 0.8;

/// Creates pedestrian agents with type-dependent speed and sensitivity
/// profiles, and integrates their kinematics.
///
/// Holds the id counter and the seeded RNG; everything randomised in the
/// simulation flows through here.
pub struct AgentFactory {
    access: AccessibilityFactors,
    weather: WeatherConditions,
    rng: SimRng,
    next_id: u32,
}

impl AgentFactory {
    pub fn new(config: &PedSimConfig, seed: u64) -> Self {
        Self {
            access: config.access,
            weather: config.weather,
            rng: SimRng::new(seed),
            next_id: 0,
        }
    }

    /// Replace the weather used for subsequently created agents.  Live
    /// agents are rescaled by the engine, not here.
    pub fn set_weather(&mut self, weather: WeatherConditions) {
        self.weather = weather;
    }

    // ── Agent creation ────────────────────────────────────────────────────

    /// Create one agent at `origin` heading for `destination`.
    ///
    /// With `agent_type` omitted, the type is drawn from the fixed
    /// categorical distribution (75 % normal, 10 % elderly, 7 % child,
    /// 5 % wheelchair, 3 % mobility aid).  The route starts as the direct
    /// segment; the engine replaces it with a planned path.
    pub fn create_agent(
        &mut self,
        origin: GeoPoint,
        destination: GeoPoint,
        agent_type: Option<AgentType>,
    ) -> PedestrianAgent {
        let agent_type = agent_type.unwrap_or_else(|| self.draw_type());

        let (lo, hi) = agent_type.sensitivity_band();
        let sensitivity = self.rng.gen_range(lo..hi);

        let base = self.rng.gen_range(BASE_SPEED_M_MIN);
        let max_speed = base * self.access.factor(agent_type);
        let walking_speed = max_speed * self.weather.speed_factor(sensitivity);

        let id = AgentId(self.next_id);
        self.next_id += 1;

        PedestrianAgent {
            id,
            agent_type,
            origin,
            destination,
            pos: origin,
            vel: Vec2::ZERO,
            route: vec![origin, destination],
            path_index: 0,
            walking_speed_m_min: walking_speed,
            max_speed_m_min: max_speed,
            weather_sensitivity: sensitivity,
            avoidance_radius_m: agent_type.avoidance_radius_m(),
            at_destination: false,
            updated_at_secs: 0.0,
        }
    }

    fn draw_type(&mut self) -> AgentType {
        let r: f64 = self.rng.gen_range(0.0..1.0);
        if r < 0.75 {
            AgentType::Normal
        } else if r < 0.85 {
            AgentType::Elderly
        } else if r < 0.92 {
            AgentType::Child
        } else if r < 0.97 {
            AgentType::Wheelchair
        } else {
            AgentType::MobilityAid
        }
    }

    /// Build one agent per origin/destination pair.  During rush hour both
    /// walking and max speed are scaled down 20 %, keeping the
    /// `walking <= max` invariant intact.
    pub fn create_batch(
        &mut self,
        pairs: &[(GeoPoint, GeoPoint)],
        rush_hour: bool,
    ) -> Vec<PedestrianAgent> {
        pairs
            .iter()
            .map(|&(origin, destination)| {
                let mut agent = self.create_agent(origin, destination, None);
                if rush_hour {
                    agent.walking_speed_m_min *= RUSH_HOUR_FACTOR;
                    agent.max_speed_m_min *= RUSH_HOUR_FACTOR;
                }
                agent
            })
            .collect()
    }

    // ── Trip sampling ─────────────────────────────────────────────────────

    /// `count` origin/destination pairs around `center` (a transit stop).
    ///
    /// Origins are polar samples (uniform angle × uniform radius) within
    /// `radius_m`.  This is deliberately centre-biased, not area-uniform:
    /// trip origins cluster around transit access points.  The destination
    /// is the stop itself 70 % of the time, otherwise another nearby sample.
    pub fn stop_centric_trips(
        &mut self,
        center: GeoPoint,
        count: usize,
        radius_m: f64,
    ) -> Vec<(GeoPoint, GeoPoint)> {
        (0..count)
            .map(|_| {
                let origin = self.point_near(center, radius_m);
                let destination = if self.rng.gen_bool(STOP_DESTINATION_SHARE) {
                    center
                } else {
                    self.point_near(center, radius_m)
                };
                (origin, destination)
            })
            .collect()
    }

    fn point_near(&mut self, center: GeoPoint, radius_m: f64) -> GeoPoint {
        let angle = self.rng.gen_range(0.0..TAU);
        let r = self.rng.gen_range(0.0..radius_m);
        LocalFrame::new(center).from_local(Vec2::new(angle.cos() * r, angle.sin() * r))
    }

    // ── Kinematics ────────────────────────────────────────────────────────

    /// Euler position step: advance `agent` by its velocity (m/s in the
    /// local frame at its position) over `dt_secs`, and bump its timestamp.
    ///
    /// `dt_secs` must be positive; the engine validates before calling.
    pub fn integrate(&self, agent: &mut PedestrianAgent, dt_secs: f64) {
        debug_assert!(dt_secs > 0.0);
        let frame = LocalFrame::new(agent.pos);
        agent.pos = frame.from_local(agent.vel * dt_secs);
        agent.updated_at_secs += dt_secs;
    }
}
