//! `pm-sim`: host tick driver for the pedestrian café mobility generator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Movement : AgentMovement::next_path for every agent with its own
//!                 HostFlags (parallel with the `parallel` feature).
//!   ② Influence: for each coffee drinker, in ascending AgentId order:
//!                   every influenceable agent within the radius, with
//!                   probability p, gets saw_coffee set.
//!   ③ Report   : TickSummary to the observer; snapshot on output intervals.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the movement phase on Rayon's thread pool.        |
//! | `fx-hash`  | FxHash for the per-tick neighbour grid.                |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pm_core::SimConfig;
//! use pm_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), prototype)
//!     .agent_count(40)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("{}", sim.outcomes());
//! ```

pub mod builder;
pub mod error;
pub mod influence;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use influence::{DEFAULT_INFLUENCE_PROBABILITY, DEFAULT_INFLUENCE_RADIUS, InfluenceRule};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use sim::Sim;
