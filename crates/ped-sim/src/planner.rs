//! Trip planning and scenario comparison.
//!
//! The planner answers "how long does this trip take?" for a fixed set of
//! transit routes and stops, and [`RoutePlanner::compare`] answers the
//! question the whole system exists for: does a proposed route layout beat
//! the current one on average travel time?

use std::cmp::Ordering;

use ped_core::GeoPoint;
use rustc_hash::FxHashSet;

use crate::{RouteSegment, TransitStop};

// ── Tunables ──────────────────────────────────────────────────────────────────

/// Both access walks shorter than this make the trip effectively
/// door-to-door transit rather than a mixed walk+ride trip (metres).
const DOOR_TO_DOOR_WALK_M: f64 = 50.0;

/// Confidence assigned per plan shape.  A plain walk on a known distance is
/// nearly certain; transit adds headway variance; the degraded fallbacks
/// mean the stop data couldn't support the trip at all.
const CONFIDENCE_WALK: f64 = 0.9;
const CONFIDENCE_TRANSIT: f64 = 0.8;
const CONFIDENCE_NO_STOPS: f64 = 0.6;
const CONFIDENCE_NO_LINK: f64 = 0.65;
const CONFIDENCE_SAME_STOP: f64 = 0.7;

// ── RushHourWindow ────────────────────────────────────────────────────────────

/// A daily window during which speeds drop and waits stretch.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RushHourWindow {
    /// Window start, minutes after midnight (inclusive).
    pub start_min: f64,
    /// Window end, minutes after midnight (exclusive).
    pub end_min: f64,
    /// Multiplier on walking and vehicle speeds inside the window.
    pub speed_factor: f64,
    /// Added to the base transit wait inside the window (minutes).
    pub extra_wait_min: f64,
}

impl RushHourWindow {
    pub fn contains(&self, minute_of_day: f64) -> bool {
        (self.start_min..self.end_min).contains(&minute_of_day)
    }
}

// ── PlannerConfig ─────────────────────────────────────────────────────────────

/// Speeds, waits, and thresholds the planner computes with.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    /// Pedestrian cruise speed, metres/minute.
    pub walk_speed_m_min: f64,
    /// Average in-vehicle speed including dwell, metres/minute.
    pub bus_speed_m_min: f64,
    /// Expected off-peak wait at a stop, minutes.
    pub base_wait_min: f64,
    /// Trips shorter than this are walked without consulting stops (metres).
    pub walk_only_below_m: f64,
    pub rush_windows: Vec<RushHourWindow>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            walk_speed_m_min: 80.0,
            bus_speed_m_min: 333.0,
            base_wait_min: 5.0,
            walk_only_below_m: 2_000.0,
            rush_windows: vec![
                // Morning peak 07:00–09:00.
                RushHourWindow {
                    start_min: 420.0,
                    end_min: 540.0,
                    speed_factor: 0.75,
                    extra_wait_min: 3.0,
                },
                // Evening peak 16:00–18:30.
                RushHourWindow {
                    start_min: 960.0,
                    end_min: 1_110.0,
                    speed_factor: 0.7,
                    extra_wait_min: 3.0,
                },
            ],
        }
    }
}

impl PlannerConfig {
    /// `(speed_factor, extra_wait_min)` in effect at `minute_of_day`.
    fn conditions_at(&self, minute_of_day: f64) -> (f64, f64) {
        self.rush_windows
            .iter()
            .find(|w| w.contains(minute_of_day))
            .map_or((1.0, 0.0), |w| (w.speed_factor, w.extra_wait_min))
    }
}

// ── Trip plans ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TripMode {
    Walking,
    Transit,
    /// Walk to a stop, ride, walk from a stop.
    Mixed,
}

/// One planned trip, door to door.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripPlan {
    pub mode: TripMode,
    /// Total door-to-door time, including waits (minutes).
    pub duration_min: f64,
    /// Straight-line trip distance (metres).
    pub distance_m: f64,
    /// Time spent waiting at stops (minutes).
    pub wait_min: f64,
    /// Route names used, `"Walking"` for walk legs.
    pub routes: Vec<String>,
    /// Planner confidence in the estimate, `[0, 1]`.
    pub confidence: f64,
}

/// Aggregates over one batch of planned trips.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioResult {
    pub trips: Vec<TripPlan>,
    pub avg_duration_min: f64,
    pub avg_wait_min: f64,
    pub mean_confidence: f64,
}

/// Side-by-side outcome of [`RoutePlanner::compare`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonResult {
    pub current: ScenarioResult,
    pub proposed: ScenarioResult,
    /// Positive when the proposed layout is faster, percent.
    pub improvement_pct: f64,
    /// Transit routes used by either scenario, sorted, walk legs excluded.
    pub routes_touched: Vec<String>,
}

// ── RoutePlanner ──────────────────────────────────────────────────────────────

/// Plans trips against one fixed route/stop layout.
///
/// Comparison between layouts builds two planners and runs the same trip
/// batch through both.
pub struct RoutePlanner {
    routes: Vec<RouteSegment>,
    stops: Vec<TransitStop>,
    config: PlannerConfig,
}

impl RoutePlanner {
    pub fn new(routes: Vec<RouteSegment>, stops: Vec<TransitStop>, config: PlannerConfig) -> Self {
        Self {
            routes,
            stops,
            config,
        }
    }

    pub fn routes(&self) -> &[RouteSegment] {
        &self.routes
    }

    pub fn stops(&self) -> &[TransitStop] {
        &self.stops
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    // ── Single-trip planning ──────────────────────────────────────────────

    /// Plan one trip departing at `depart_min` minutes after midnight.
    ///
    /// Short trips are walked outright.  Longer trips compare walking
    /// against the best stop-to-stop transit itinerary and take whichever
    /// is faster.  Missing or degenerate stop data degrades to a walking
    /// plan with reduced confidence instead of failing.
    pub fn plan(&self, origin: GeoPoint, destination: GeoPoint, depart_min: f64) -> TripPlan {
        let distance = origin.distance_m(destination);
        let (speed_factor, extra_wait) = self.config.conditions_at(depart_min);

        let walk = self.walk_plan(distance, speed_factor, CONFIDENCE_WALK);
        if distance < self.config.walk_only_below_m {
            return walk;
        }

        let Some(board) = self.nearest_stop(origin) else {
            return self.walk_plan(distance, speed_factor, CONFIDENCE_NO_STOPS);
        };
        let Some(alight) = self.nearest_stop(destination) else {
            return self.walk_plan(distance, speed_factor, CONFIDENCE_NO_STOPS);
        };
        if board.name == alight.name {
            return self.walk_plan(distance, speed_factor, CONFIDENCE_SAME_STOP);
        }
        let ride_routes = shared_routes(board, alight);
        if ride_routes.is_empty() {
            // Stops exist but no line connects them; no transfer modelling.
            return self.walk_plan(distance, speed_factor, CONFIDENCE_NO_LINK);
        }

        let access_m = origin.distance_m(board.location);
        let egress_m = alight.location.distance_m(destination);
        let ride_m = board.location.distance_m(alight.location);

        let walk_speed = self.config.walk_speed_m_min * speed_factor;
        let ride_speed = self.config.bus_speed_m_min * speed_factor;
        let wait_min = self.config.base_wait_min + extra_wait;
        let duration_min =
            (access_m + egress_m) / walk_speed + ride_m / ride_speed + wait_min;

        if walk.duration_min <= duration_min {
            return walk;
        }

        let mode = if access_m < DOOR_TO_DOOR_WALK_M && egress_m < DOOR_TO_DOOR_WALK_M {
            TripMode::Transit
        } else {
            TripMode::Mixed
        };

        TripPlan {
            mode,
            duration_min,
            distance_m: distance,
            wait_min,
            routes: ride_routes,
            confidence: CONFIDENCE_TRANSIT,
        }
    }

    fn walk_plan(&self, distance_m: f64, speed_factor: f64, confidence: f64) -> TripPlan {
        TripPlan {
            mode: TripMode::Walking,
            duration_min: distance_m / (self.config.walk_speed_m_min * speed_factor),
            distance_m,
            wait_min: 0.0,
            routes: vec!["Walking".to_string()],
            confidence,
        }
    }

    fn nearest_stop(&self, p: GeoPoint) -> Option<&TransitStop> {
        self.stops.iter().min_by(|a, b| {
            p.distance_m(a.location)
                .partial_cmp(&p.distance_m(b.location))
                .unwrap_or(Ordering::Equal)
        })
    }

    // ── Scenario simulation ───────────────────────────────────────────────

    /// Plan every trip in the batch and aggregate.
    pub fn simulate(&self, trips: &[(GeoPoint, GeoPoint)], depart_min: f64) -> ScenarioResult {
        let plans: Vec<TripPlan> = trips
            .iter()
            .map(|&(o, d)| self.plan(o, d, depart_min))
            .collect();
        if plans.is_empty() {
            return ScenarioResult::default();
        }

        let n = plans.len() as f64;
        let avg_duration_min = plans.iter().map(|p| p.duration_min).sum::<f64>() / n;
        let avg_wait_min = plans.iter().map(|p| p.wait_min).sum::<f64>() / n;
        let mean_confidence = plans.iter().map(|p| p.confidence).sum::<f64>() / n;

        ScenarioResult {
            trips: plans,
            avg_duration_min,
            avg_wait_min,
            mean_confidence,
        }
    }

    /// Run the same trip batch through this layout and `proposed`, and
    /// report the average travel-time improvement.
    ///
    /// With the `parallel` Cargo feature the two scenario runs share
    /// Rayon's thread pool; results are identical either way.
    pub fn compare(
        &self,
        proposed: &RoutePlanner,
        trips: &[(GeoPoint, GeoPoint)],
        depart_min: f64,
    ) -> ComparisonResult {
        #[cfg(not(feature = "parallel"))]
        let (current, proposed_result) =
            (self.simulate(trips, depart_min), proposed.simulate(trips, depart_min));

        #[cfg(feature = "parallel")]
        let (current, proposed_result) = rayon::join(
            || self.simulate(trips, depart_min),
            || proposed.simulate(trips, depart_min),
        );

        let improvement_pct = if current.avg_duration_min > 0.0 {
            (current.avg_duration_min - proposed_result.avg_duration_min)
                / current.avg_duration_min
                * 100.0
        } else {
            0.0
        };

        let mut touched: FxHashSet<&str> = FxHashSet::default();
        for plan in current.trips.iter().chain(proposed_result.trips.iter()) {
            for route in &plan.routes {
                if route != "Walking" {
                    touched.insert(route);
                }
            }
        }
        let mut routes_touched: Vec<String> = touched.into_iter().map(String::from).collect();
        routes_touched.sort_unstable();

        ComparisonResult {
            current,
            proposed: proposed_result,
            improvement_pct,
            routes_touched,
        }
    }
}

/// Route names serving both stops.
fn shared_routes(board: &TransitStop, alight: &TransitStop) -> Vec<String> {
    board
        .routes
        .iter()
        .filter(|r| alight.serves(r))
        .cloned()
        .collect()
}
