//! A* shortest paths over the sidewalk graph, plus obstacle queries and the
//! avoidance steering force.
//!
//! # Degrade-gracefully policy
//!
//! Path queries never fail.  When no snap candidate exists (empty or fully
//! filtered network) or the graph is disconnected, the result is the direct
//! two-point segment `[start, goal]`.  The simulation always gets *a*
//! walkable polyline; callers that care can detect the two-point fallback by
//! length.
//!
//! # Cost model
//!
//! Haversine distance in metres is both the edge cost and the heuristic —
//! a true lower bound on remaining distance, so A* stays admissible (and
//! consistent, by the triangle inequality on the sphere).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ped_core::{GeoPoint, LocalFrame, NodeId, Vec2};

use crate::network::{AccessNeed, Accessibility, SidewalkNetwork, SidewalkNode};

/// Default obstacle look-ahead distance in metres.
pub const DEFAULT_LOOK_AHEAD_M: f64 = 5.0;

/// Ceiling on the per-obstacle lateral push (force units).
const MAX_PUSH: f64 = 3.0;

/// Lateral clearance added to an obstacle's radius when deciding whether it
/// blocks the travel corridor.
const CORRIDOR_MARGIN_M: f64 = 1.0;

// ── Pathfinder ────────────────────────────────────────────────────────────────

/// Shortest-path and obstacle queries over an owned [`SidewalkNetwork`].
///
/// Stateless over the network it was constructed with; safe to share
/// read-only across concurrent engines.
pub struct Pathfinder {
    network: SidewalkNetwork,
}

impl Pathfinder {
    pub fn new(network: SidewalkNetwork) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &SidewalkNetwork {
        &self.network
    }

    // ── Path search ───────────────────────────────────────────────────────

    /// Ordered points from `start` to `goal` inclusive.
    ///
    /// Start and goal are snapped to the nearest network nodes satisfying
    /// `need`; after the search the endpoint nodes are replaced with the
    /// exact un-snapped coordinates so agents never visibly jump.
    pub fn find_path(&self, start: GeoPoint, goal: GeoPoint, need: AccessNeed) -> Vec<GeoPoint> {
        let snap_ok = |n: &SidewalkNode| match need {
            AccessNeed::Any => true,
            AccessNeed::Limited | AccessNeed::Full => n.access != Accessibility::None,
        };

        let (Some(s), Some(g)) = (
            self.network.nearest_node(start, snap_ok),
            self.network.nearest_node(goal, snap_ok),
        ) else {
            log::debug!("path query: no snap candidate, direct segment");
            return vec![start, goal];
        };

        match self.astar(s, g, need) {
            Some(nodes) if nodes.len() >= 2 => {
                let mut points: Vec<GeoPoint> =
                    nodes.iter().map(|&id| self.network.node(id).pos).collect();
                // Exact endpoints, not the snapped nodes.
                let last = points.len() - 1;
                points[0] = start;
                points[last] = goal;
                points
            }
            // Start and goal snapped to the same node, or no route.
            _ => vec![start, goal],
        }
    }

    /// A* over node IDs.  Returns the node sequence `start..=goal`, or
    /// `None` when the graph is disconnected between them.
    fn astar(&self, start: NodeId, goal: NodeId, need: AccessNeed) -> Option<Vec<NodeId>> {
        if start == goal {
            return Some(vec![start]);
        }

        let expand_ok = |n: &SidewalkNode| match need {
            // Full demands an accessible path end to end; Limited and Any
            // only constrain the snap.
            AccessNeed::Full => n.access != Accessibility::None,
            AccessNeed::Limited | AccessNeed::Any => true,
        };

        let goal_pos = self.network.node(goal).pos;
        let n = self.network.node_count();

        let mut g_score = vec![f64::INFINITY; n];
        let mut prev = vec![NodeId::INVALID; n];
        let mut closed = vec![false; n];
        g_score[start.index()] = 0.0;

        // Min-heap keyed by (f in millimetres, NodeId).  The integer key
        // makes the heap `Ord`; the NodeId secondary key makes tie-breaking
        // deterministic.
        let mut open: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
        let h0 = self.network.node(start).pos.distance_m(goal_pos);
        open.push(Reverse((to_mm(h0), start)));

        while let Some(Reverse((_, node))) = open.pop() {
            if node == goal {
                return Some(reconstruct(prev, goal));
            }
            if closed[node.index()] {
                continue;
            }
            closed[node.index()] = true;

            let node_pos = self.network.node(node).pos;
            for &next in &self.network.node(node).neighbors {
                let next_node = self.network.node(next);
                if closed[next.index()] || !expand_ok(next_node) {
                    continue;
                }
                let tentative = g_score[node.index()] + node_pos.distance_m(next_node.pos);
                if tentative < g_score[next.index()] {
                    g_score[next.index()] = tentative;
                    prev[next.index()] = node;
                    let f = tentative + next_node.pos.distance_m(goal_pos);
                    open.push(Reverse((to_mm(f), next)));
                }
            }
        }
        None
    }

    // ── Obstacle queries ──────────────────────────────────────────────────

    /// `true` if any obstacle overlaps a circle of `radius_m` around `pos`.
    pub fn has_obstacle_at(&self, pos: GeoPoint, radius_m: f64) -> bool {
        self.network
            .obstacles()
            .iter()
            .any(|o| pos.distance_m(o.pos) < o.radius_m + radius_m)
    }

    /// Steering force away from obstacles in the look-ahead corridor.
    ///
    /// The force is perpendicular to the current velocity, directed away
    /// from each obstacle's side of the corridor, and scales with proximity
    /// up to [`MAX_PUSH`] per obstacle.  Zero velocity has no look-ahead
    /// direction and yields the zero vector.
    pub fn avoidance_force(&self, pos: GeoPoint, vel: Vec2, look_ahead_m: f64) -> Vec2 {
        if vel.length_sq() < 1e-12 {
            return Vec2::ZERO;
        }

        let frame = LocalFrame::new(pos);
        let heading = vel.normalized();
        let side = heading.perp();

        let mut force = Vec2::ZERO;
        for ob in self.network.obstacles() {
            let rel = frame.to_local(ob.pos);
            let along = rel.dot(heading);
            // Behind the agent, or past the look-ahead horizon.
            if along <= 0.0 || along > look_ahead_m + ob.radius_m {
                continue;
            }
            let lateral = rel.dot(side);
            if lateral.abs() > ob.radius_m + CORRIDOR_MARGIN_M {
                continue;
            }
            let proximity = 1.0 - along / (look_ahead_m + ob.radius_m);
            // Dead-ahead obstacles (lateral == 0) get a fixed dodge side.
            let away = if lateral > 0.0 { -1.0 } else { 1.0 };
            force += side * (away * MAX_PUSH * proximity);
        }
        force
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

#[inline]
fn to_mm(meters: f64) -> u64 {
    (meters * 1000.0) as u64
}

fn reconstruct(prev: Vec<NodeId>, goal: NodeId) -> Vec<NodeId> {
    let mut nodes = vec![goal];
    let mut cur = goal;
    while prev[cur.index()] != NodeId::INVALID {
        cur = prev[cur.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    nodes
}
