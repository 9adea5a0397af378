//! `ped-agent` — pedestrian agents, weather, and the agent factory.
//!
//! # Crate layout
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | [`agent`]   | `PedestrianAgent`, `AgentType`                         |
//! | [`weather`] | `WeatherConditions`, speed-factor model                |
//! | [`config`]  | `PedSimConfig`, `CrowdParams`, `AccessibilityFactors`  |
//! | [`factory`] | `AgentFactory`: creation, trip sampling, integration   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                             |
//! |---------|----------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types. |

pub mod agent;
pub mod config;
pub mod factory;
pub mod weather;

#[cfg(test)]
mod tests;

pub use agent::{AgentType, PedestrianAgent};
pub use config::{AccessibilityFactors, CrowdParams, PedSimConfig};
pub use factory::AgentFactory;
pub use weather::{MIN_SPEED_FACTOR, WeatherConditions, WeatherKind};
