//! `pm-behavior`: the per-agent café lifecycle.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`state`]     | `LifecycleState` enum                                        |
//! | [`machine`]   | `AgentMovement`: per-agent state and one handler per state  |
//! | [`prototype`] | `MovementPrototype`: shared geometry, queue, config, speed  |
//! | [`flags`]     | `HostFlags`: movement/routing shared booleans               |
//! | [`context`]   | `TickContext<'a>`: tick value plus the agent's flags        |
//! | [`config`]    | `MovementConfig`: timers, radii, offsets                    |
//! | [`error`]     | `BehaviorError`, `BehaviorResult<T>`                         |
//!
//! # Lifecycle
//!
//! ```text
//! NotArrived → Arrived ─┬─ ind → Independent → IndependentQueueing ─┬→ GoingToClassroom → Classroom ─┐
//!                       │              │ (queue full)              └→ GoingToTable → Table ─┐      │
//!                       └─ dep → Dependent ←───────────────────────────────────────────────┼──────┘
//!                                    │ (must leave)                                          │
//!                                    └──────────────→ Leaving ←──────────────────────────────┘
//!                                                        └→ Out
//! ```
//!
//! Seeing someone drink coffee (`HostFlags::saw_coffee`) sends an agent back
//! to `Independent` from wherever it is, unless it is already in line.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `MovementConfig` and `LifecycleState`. |

pub mod config;
pub mod context;
pub mod error;
pub mod flags;
pub mod machine;
pub mod prototype;
pub mod state;

#[cfg(test)]
mod tests;

pub use config::MovementConfig;
pub use context::TickContext;
pub use error::{BehaviorError, BehaviorResult};
pub use flags::HostFlags;
pub use machine::AgentMovement;
pub use prototype::MovementPrototype;
pub use state::LifecycleState;
