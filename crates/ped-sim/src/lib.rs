//! `ped-sim` — simulation engine, trip planner, and scenario comparison.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`routes`]  | `RouteSegment`, `TransitStop`                           |
//! | [`planner`] | `RoutePlanner`: trip planning and layout comparison     |
//! | [`engine`]  | `PedestrianSim`: population, step loop, environment     |
//! | [`error`]   | `EngineError`, `EngineResult`                           |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Scenario comparison runs both layouts on Rayon.        |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.     |

pub mod engine;
pub mod error;
pub mod planner;
pub mod routes;


pub use engine::PedestrianSim;
pub use error::{EngineError, EngineResult};
pub use planner::{
    ComparisonResult, PlannerConfig, RoutePlanner, RushHourWindow, ScenarioResult, TripMode,
    TripPlan,
};
pub use routes::{RouteSegment, TransitStop};
