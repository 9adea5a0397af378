//! Boid-style steering: separation, alignment, cohesion, and the goal force.
//!
//! # Neighbour search
//!
//! Every force does an O(n) scan over the full population per agent.  That
//! is fine at the intended scale (a few hundred agents); past that, swap in
//! a spatial index for the neighbour queries — the force formulas themselves
//! must not change.

use ped_agent::{CrowdParams, PedestrianAgent};
use ped_core::{LocalFrame, Vec2};

/// Waypoint arrival threshold in metres.
pub const WAYPOINT_RADIUS_M: f64 = 2.0;

/// Separation carries double weight relative to alignment and cohesion:
/// collision avoidance outranks the urge to flock.
const SEPARATION_WEIGHT: f64 = 2.0;
const ALIGNMENT_WEIGHT: f64 = 1.0;
const COHESION_WEIGHT: f64 = 1.0;

/// Flocking-force computation over an agent population snapshot.
///
/// Stateless over its parameters; safe to share read-only across engines.
pub struct CrowdModel {
    params: CrowdParams,
}

impl CrowdModel {
    pub fn new(params: CrowdParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CrowdParams {
        &self.params
    }

    // ── Flocking ──────────────────────────────────────────────────────────

    /// Combined separation + alignment + cohesion steering for `agent`
    /// against the population snapshot `all` (which may include `agent`
    /// itself; it is skipped by id).
    pub fn flocking_force(&self, agent: &PedestrianAgent, all: &[PedestrianAgent]) -> Vec2 {
        let frame = LocalFrame::new(agent.pos);

        let mut separation = Vec2::ZERO;
        let mut separation_n = 0usize;
        let mut alignment = Vec2::ZERO;
        let mut alignment_n = 0usize;
        let mut cohesion = Vec2::ZERO;
        let mut cohesion_n = 0usize;

        for other in all {
            if other.id == agent.id {
                continue;
            }
            let dist = agent.pos.distance_m(other.pos);

            if dist > 0.0 && dist < self.params.separation_radius_m {
                // Inverse-distance weighting: closer neighbours repel harder.
                let away = (-frame.to_local(other.pos)).normalized() * (1.0 / dist);
                separation += away;
                separation_n += 1;
            }
            if dist < self.params.alignment_radius_m {
                alignment += other.vel;
                alignment_n += 1;
            }
            if dist < self.params.cohesion_radius_m {
                cohesion += frame.to_local(other.pos);
                cohesion_n += 1;
            }
        }

        let mut force = Vec2::ZERO;
        if separation_n > 0 {
            let mean = separation * (1.0 / separation_n as f64);
            force += self.steer(agent, mean) * SEPARATION_WEIGHT;
        }
        if alignment_n > 0 {
            let mean = alignment * (1.0 / alignment_n as f64);
            force += self.steer(agent, mean) * ALIGNMENT_WEIGHT;
        }
        if cohesion_n > 0 {
            // Seek the local-frame centroid of the neighbourhood.
            let centroid = cohesion * (1.0 / cohesion_n as f64);
            force += self.steer(agent, centroid) * COHESION_WEIGHT;
        }

        force.limit(self.params.max_force)
    }

    // ── Goal seeking ──────────────────────────────────────────────────────

    /// Seek force toward the agent's current waypoint.
    ///
    /// Advances `path_index` when the agent is within
    /// [`WAYPOINT_RADIUS_M`] of the waypoint; at the final waypoint sets
    /// `at_destination` (permanently) and returns zero.  `path_index` only
    /// ever grows.
    pub fn goal_force(&self, agent: &mut PedestrianAgent) -> Vec2 {
        if agent.at_destination {
            return Vec2::ZERO;
        }
        let Some(target) = agent.waypoint() else {
            // Empty or exhausted route: nothing left to seek.
            agent.at_destination = true;
            return Vec2::ZERO;
        };

        if agent.pos.distance_m(target) < WAYPOINT_RADIUS_M {
            if agent.path_index + 1 >= agent.route.len() {
                agent.at_destination = true;
                return Vec2::ZERO;
            }
            agent.path_index += 1;
        }

        let target = agent.route[agent.path_index];
        let frame = LocalFrame::new(agent.pos);
        self.steer(agent, frame.to_local(target))
    }

    /// Seek-style steering correction: scale `desired` to the agent's
    /// cruise speed, subtract the current velocity, clamp to max force.
    fn steer(&self, agent: &PedestrianAgent, desired: Vec2) -> Vec2 {
        if desired.length_sq() < 1e-12 {
            return Vec2::ZERO;
        }
        let desired = desired.normalized() * agent.walking_speed_mps();
        (desired - agent.vel).limit(self.params.max_force)
    }
}
