//! `pm-core`: foundational types for the pedestrian café mobility generator.
//!
//! This crate is a dependency of every other `pm-*` crate.  It has no `pm-*`
//! dependencies and only two external ones (`rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `TableId`                                  |
//! | [`geo`]         | `Point` (planar, map units)                           |
//! | [`time`]        | `Tick`, `SimConfig`                                   |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`group`]       | `BehaviorGroup` (independent / dependent)             |
//! | [`error`]       | `PmError`, `PmResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod group;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{PmError, PmResult};
pub use geo::Point;
pub use group::BehaviorGroup;
pub use ids::{AgentId, TableId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimConfig, Tick};
