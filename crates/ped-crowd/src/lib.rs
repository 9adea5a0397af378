//! `ped-crowd` — boid-style crowd dynamics and area crowd metrics.
//!
//! # Crate layout
//!
//! | Module      | Contents                                           |
//! |-------------|----------------------------------------------------|
//! | [`forces`]  | `CrowdModel`: flocking and goal-seeking forces     |
//! | [`metrics`] | `CrowdMetrics`, [`crowd_metrics`] area aggregation |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                             |
//! |---------|----------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types. |

pub mod forces;
pub mod metrics;

#[cfg(test)]
mod tests;

pub use forces::{CrowdModel, WAYPOINT_RADIUS_M};
pub use metrics::{CrowdMetrics, MAX_COMFORTABLE_DENSITY, MAX_WALK_SPEED_M_MIN, crowd_metrics};
