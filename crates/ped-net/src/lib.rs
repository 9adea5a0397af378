//! `ped-net` — sidewalk network, spatial indexing, and pathfinding.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`network`] | `SidewalkNetwork` (+ builder), nodes, obstacles, R-tree    |
//! | [`path`]    | `Pathfinder`: A*, obstacle queries, avoidance force        |
//!
//! This crate defines no error type: the pathfinding contract is that every
//! query degrades to a usable result (worst case, the direct two-point
//! segment) rather than failing.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                             |
//! |---------|----------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types. |

pub mod network;
pub mod path;


pub use network::{
    AccessNeed, Accessibility, Obstacle, ObstacleKind, SidewalkNetwork, SidewalkNetworkBuilder,
    SidewalkNode,
};
pub use path::{DEFAULT_LOOK_AHEAD_M, Pathfinder};
