//! `pm-queue`: the single shared coffee queue.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`coordinator`] | `QueueCoordinator` (occupancy + outcome counters)        |
//! | [`ticket`]      | `QueueTicket` (move-only place in line), `QueueSlot`     |
//! | [`outcomes`]    | `QueueOutcomes` (served / gave-up per behaviour group)   |
//! | [`error`]       | `QueueError`, `QueueResult<T>`                           |
//!
//! # Ownership model
//!
//! The host creates exactly one [`QueueCoordinator`] and hands an
//! `Arc<QueueCoordinator>` to every agent.  All mutation goes through an
//! internal mutex, so join / depart / give-up stay serialized even when agent
//! ticks run in parallel.
//!
//! A successful [`QueueCoordinator::try_join`] returns a [`QueueTicket`].
//! The ticket is not `Clone`; [`QueueCoordinator::depart`] consumes it.  An
//! agent therefore cannot leave the queue without having joined it, and
//! cannot leave twice.

pub mod coordinator;
pub mod error;
pub mod outcomes;
pub mod ticket;


pub use coordinator::{DEFAULT_CAPACITY, DEFAULT_SLOT_TOLERANCE, QueueCoordinator};
pub use error::{QueueError, QueueResult};
pub use outcomes::QueueOutcomes;
pub use ticket::{QueueSlot, QueueTicket};
