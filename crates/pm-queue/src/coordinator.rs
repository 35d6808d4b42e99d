//! `QueueCoordinator`: bounded occupancy shared by every agent.

use std::sync::{Mutex, MutexGuard, PoisonError};

use pm_core::BehaviorGroup;

use crate::error::{QueueError, QueueResult};
use crate::outcomes::QueueOutcomes;
use crate::ticket::QueueTicket;

/// Maximum number of agents in line at once.
pub const DEFAULT_CAPACITY: usize = 10;

/// Distance under which an agent counts as standing on its slot.
pub const DEFAULT_SLOT_TOLERANCE: f64 = 1.0;

#[derive(Debug, Default)]
struct QueueState {
    occupancy: usize,
    outcomes:  QueueOutcomes,
}

/// The café's single queue.
///
/// Share it with `Arc<QueueCoordinator>`; every method takes `&self`.
#[derive(Debug)]
pub struct QueueCoordinator {
    capacity:   usize,
    slot_count: usize,
    tolerance:  f64,
    state:      Mutex<QueueState>,
}

impl QueueCoordinator {
    /// A queue admitting `capacity` agents, drawn over `slot_count` slot
    /// positions.
    pub fn new(capacity: usize, slot_count: usize) -> QueueResult<Self> {
        if capacity == 0 {
            return Err(QueueError::ZeroCapacity);
        }
        if slot_count < 2 {
            return Err(QueueError::TooFewSlots(slot_count));
        }
        Ok(Self {
            capacity,
            slot_count,
            tolerance: DEFAULT_SLOT_TOLERANCE,
            state: Mutex::new(QueueState::default()),
        })
    }

    /// Override the slot-reached distance carried by issued tickets.
    pub fn with_slot_tolerance(mut self, tolerance: f64) -> QueueResult<Self> {
        if !(tolerance > 0.0 && tolerance.is_finite()) {
            return Err(QueueError::InvalidTolerance(tolerance));
        }
        self.tolerance = tolerance;
        Ok(self)
    }

    // A panic while holding the lock cannot leave the counters half-written,
    // so a poisoned guard is still consistent.
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn occupancy(&self) -> usize {
        self.lock().occupancy
    }

    pub fn outcomes(&self) -> QueueOutcomes {
        self.lock().outcomes
    }

    /// Take a place in line if there is room.
    ///
    /// The ticket starts at the slot just ahead of the tail entry point.
    pub fn try_join(&self) -> Option<QueueTicket> {
        let mut state = self.lock();
        if state.occupancy >= self.capacity {
            return None;
        }
        state.occupancy += 1;
        tracing::debug!(occupancy = state.occupancy, "queue join");
        Some(QueueTicket::new(self.slot_count - 2, self.tolerance))
    }

    /// Leave the line with coffee.  Consumes the ticket.
    pub fn depart(&self, ticket: QueueTicket, group: BehaviorGroup) {
        let mut state = self.lock();
        state.occupancy = state.occupancy.saturating_sub(1);
        state.outcomes.record_served(group);
        tracing::debug!(
            occupancy = state.occupancy,
            group = group.as_str(),
            served = ticket.is_served(),
            "queue depart"
        );
    }

    /// Record that an agent found the queue full.  Occupancy is unchanged.
    pub fn give_up(&self, group: BehaviorGroup) {
        let mut state = self.lock();
        state.outcomes.record_gave_up(group);
        tracing::debug!(occupancy = state.occupancy, group = group.as_str(), "queue full, gave up");
    }
}
