//! `pm-mobility`: the paths agents hand back to the host each tick.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                   |
//! |-----------|------------------------------------------------------------|
//! | [`path`]  | `Path`: speed plus an ordered waypoint list               |
//! | [`speed`] | `SpeedPolicy` trait, `UniformSpeed`, `FixedSpeed`          |
//! | [`error`] | `MobilityError`, `MobilityResult<T>`                       |
//!
//! # Path model
//!
//! Every path starts at the agent's current position.  A path with a single
//! waypoint means "stay put this tick"; otherwise the host walks the
//! waypoints in order at `speed` before asking for the next path.

pub mod error;
pub mod path;
pub mod speed;

#[cfg(test)]
mod tests;

pub use error::{MobilityError, MobilityResult};
pub use path::Path;
pub use speed::{FixedSpeed, SpeedPolicy, UniformSpeed};
