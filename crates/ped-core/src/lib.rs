//! `ped-core` — foundational types for the pedestrian simulation core.
//!
//! This crate is a dependency of every other `ped-*` crate.  It intentionally
//! has no `ped-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                              |
//! |----------|-------------------------------------------------------|
//! | [`ids`]  | `AgentId`, `NodeId`, `ObstacleId`                     |
//! | [`geo`]  | `GeoPoint`, haversine distance, `LocalFrame`          |
//! | [`vec2`] | `Vec2` force/velocity arithmetic                      |
//! | [`rng`]  | `SimRng` (seeded, deterministic)                      |
//! | [`mode`] | `TravelMode` enum                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod geo;
pub mod ids;
pub mod mode;
pub mod rng;
pub mod vec2;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::{GeoPoint, LocalFrame, METERS_PER_DEG_LAT, METERS_PER_DEG_LON};
pub use ids::{AgentId, NodeId, ObstacleId};
pub use mode::TravelMode;
pub use rng::SimRng;
pub use vec2::Vec2;
