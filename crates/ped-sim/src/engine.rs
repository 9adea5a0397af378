//! The pedestrian simulation engine and its step loop.

use std::mem;

use ped_agent::{AgentFactory, PedSimConfig, PedestrianAgent, WeatherConditions};
use ped_core::{GeoPoint, METERS_PER_DEG_LAT, METERS_PER_DEG_LON, Vec2};
use ped_crowd::{CrowdMetrics, CrowdModel, crowd_metrics};
use ped_net::{
    Accessibility, DEFAULT_LOOK_AHEAD_M, Pathfinder, SidewalkNetwork, SidewalkNetworkBuilder,
};

use crate::{
    EngineError, EngineResult, PlannerConfig, RoutePlanner, RouteSegment, TransitStop,
};

// ── Tunables ──────────────────────────────────────────────────────────────────

/// Goal seeking dominates the flock: an agent follows its route first and
/// the crowd second.
const GOAL_WEIGHT: f64 = 3.0;

/// Distance from a stop at which approach nodes are laid out in the
/// auto-generated network (metres).
const APPROACH_NODE_M: f64 = 100.0;

/// Stops closer than this get their centre nodes linked directly (metres).
const STOP_LINK_M: f64 = 500.0;

/// Radius around each stop within which spawned trips originate (metres).
const SPAWN_RADIUS_M: f64 = 1_000.0;

/// Default sidewalk geometry for auto-generated nodes.
const DEFAULT_WIDTH_M: f64 = 3.0;
const DEFAULT_CAPACITY: u32 = 50;

// ── PedestrianSim ─────────────────────────────────────────────────────────────

/// Owns the full simulation state and drives the two-phase step loop:
///
/// 1. **Flocking phase**: separation/alignment/cohesion forces for every
///    agent, computed against a pre-step population snapshot.
/// 2. **Apply phase** (sequential, ascending spawn order): goal force,
///    obstacle avoidance, velocity clamp, Euler integration, and arrival
///    pruning.
pub struct PedestrianSim {
    config: PedSimConfig,
    planner: RoutePlanner,
    pathfinder: Pathfinder,
    crowd: CrowdModel,
    factory: AgentFactory,
    stops: Vec<TransitStop>,
    agents: Vec<PedestrianAgent>,
    running: bool,
    elapsed_secs: f64,
}

impl PedestrianSim {
    /// Build an engine over the given transit layout.
    ///
    /// A config with an empty network gets a stop-centred proxy network
    /// auto-generated from `stops`.
    pub fn new(
        routes: Vec<RouteSegment>,
        stops: Vec<TransitStop>,
        mut config: PedSimConfig,
        planner_config: PlannerConfig,
        seed: u64,
    ) -> Self {
        let network = mem::take(&mut config.network);
        let network = if network.is_empty() {
            default_network(&stops)
        } else {
            network
        };

        log::info!(
            "engine up: {} route(s), {} stop(s), {} network node(s), cap {}",
            routes.len(),
            stops.len(),
            network.node_count(),
            config.max_agents,
        );

        let factory = AgentFactory::new(&config, seed);
        let crowd = CrowdModel::new(config.crowd);
        let planner = RoutePlanner::new(routes, stops.clone(), planner_config);

        Self {
            config,
            planner,
            pathfinder: Pathfinder::new(network),
            crowd,
            factory,
            stops,
            agents: Vec::new(),
            running: false,
            elapsed_secs: 0.0,
        }
    }

    // ── Session control ───────────────────────────────────────────────────

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn agents(&self) -> &[PedestrianAgent] {
        &self.agents
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn planner(&self) -> &RoutePlanner {
        &self.planner
    }

    pub fn network(&self) -> &SidewalkNetwork {
        self.pathfinder.network()
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Spawn up to `count` agents, split evenly across the stops (the
    /// remainder goes to the first stops).  Returns how many were actually
    /// created; the configured cap is never exceeded.
    pub fn add_agents(&mut self, count: usize, rush_hour: bool) -> EngineResult<usize> {
        if self.config.max_agents == 0 {
            return Err(EngineError::ZeroAgentCap);
        }
        if self.stops.is_empty() {
            log::warn!("add_agents with no stops; nothing spawned");
            return Ok(0);
        }

        let capacity = self.config.max_agents.saturating_sub(self.agents.len());
        let spawn = count.min(capacity);
        if spawn == 0 {
            return Ok(0);
        }

        let per_stop = spawn / self.stops.len();
        let remainder = spawn % self.stops.len();

        let mut created = 0usize;
        for (i, stop) in self.stops.iter().enumerate() {
            let here = per_stop + usize::from(i < remainder);
            if here == 0 {
                continue;
            }
            let trips = self
                .factory
                .stop_centric_trips(stop.location, here, SPAWN_RADIUS_M);
            for mut agent in self.factory.create_batch(&trips, rush_hour) {
                agent.route = self.pathfinder.find_path(
                    agent.pos,
                    agent.destination,
                    agent.agent_type.access_need(),
                );
                agent.path_index = 0;
                self.agents.push(agent);
                created += 1;
            }
        }

        log::debug!("spawned {created} agent(s), population {}", self.agents.len());
        Ok(created)
    }

    // ── Step loop ─────────────────────────────────────────────────────────

    /// Advance the simulation by `dt_secs`.
    ///
    /// A no-op while stopped or empty.  Agents that reach their destination
    /// during the step are pruned afterwards.
    pub fn step(&mut self, dt_secs: f64) -> EngineResult<()> {
        if !(dt_secs > 0.0 && dt_secs.is_finite()) {
            return Err(EngineError::InvalidTimeStep(dt_secs));
        }
        if !self.running || self.agents.is_empty() {
            return Ok(());
        }

        // Flocking phase: all forces read the same pre-step snapshot so the
        // outcome is independent of agent order.
        let snapshot = self.agents.clone();
        let flock: Vec<Vec2> = snapshot
            .iter()
            .map(|a| self.crowd.flocking_force(a, &snapshot))
            .collect();

        // Apply phase, sequential in spawn order.
        for (agent, flock_force) in self.agents.iter_mut().zip(flock) {
            let goal = self.crowd.goal_force(agent) * GOAL_WEIGHT;
            if agent.at_destination {
                continue;
            }
            let avoid = self
                .pathfinder
                .avoidance_force(agent.pos, agent.vel, DEFAULT_LOOK_AHEAD_M)
                * self.crowd.params().avoidance_strength;

            let force = goal + flock_force + avoid;
            agent.vel = (agent.vel + force * dt_secs).limit(agent.max_speed_mps());
            self.factory.integrate(agent, dt_secs);
        }

        self.agents.retain(|a| !a.at_destination);
        self.elapsed_secs += dt_secs;
        Ok(())
    }

    // ── Environment ───────────────────────────────────────────────────────

    /// Swap the weather and rescale every live agent's walking speed
    /// against its unmodified ceiling.
    pub fn set_weather(&mut self, weather: WeatherConditions) {
        self.factory.set_weather(weather);
        self.config.weather = weather;
        for agent in &mut self.agents {
            agent.walking_speed_m_min =
                agent.max_speed_m_min * weather.speed_factor(agent.weather_sensitivity);
        }
        log::debug!("weather changed, {} agent(s) rescaled", self.agents.len());
    }

    /// Crowd metrics over the agents within `radius_m` of `center`.
    pub fn crowd_metrics(&self, center: GeoPoint, radius_m: f64) -> CrowdMetrics {
        crowd_metrics(&self.agents, center, radius_m)
    }
}

// ── Default network generation ────────────────────────────────────────────────

/// Stop-centred proxy sidewalk network: one node at each stop plus four
/// approach nodes ~100 m out in the cardinal directions, with nearby stop
/// centres linked directly.
fn default_network(stops: &[TransitStop]) -> SidewalkNetwork {
    let mut builder = SidewalkNetworkBuilder::new();
    let mut centers = Vec::with_capacity(stops.len());

    for stop in stops {
        let center =
            builder.add_node(stop.location, DEFAULT_WIDTH_M, Accessibility::Full, DEFAULT_CAPACITY);

        let dlat = APPROACH_NODE_M / METERS_PER_DEG_LAT;
        let dlon =
            APPROACH_NODE_M / (METERS_PER_DEG_LON * stop.location.lat.to_radians().cos());
        let offsets = [
            GeoPoint::new(stop.location.lat + dlat, stop.location.lon),
            GeoPoint::new(stop.location.lat - dlat, stop.location.lon),
            GeoPoint::new(stop.location.lat, stop.location.lon + dlon),
            GeoPoint::new(stop.location.lat, stop.location.lon - dlon),
        ];
        for pos in offsets {
            let approach =
                builder.add_node(pos, DEFAULT_WIDTH_M, Accessibility::Full, DEFAULT_CAPACITY);
            builder.connect(center, approach);
        }

        centers.push((center, stop.location));
    }

    for (i, &(a, pa)) in centers.iter().enumerate() {
        for &(b, pb) in centers[i + 1..].iter() {
            if pa.distance_m(pb) <= STOP_LINK_M {
                builder.connect(a, b);
            }
        }
    }

    builder.build()
}
