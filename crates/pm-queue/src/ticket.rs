//! An agent's place in line.

use pm_core::Point;

/// Where a ticket holder currently stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QueueSlot {
    /// Walking toward slot `i` (0 is the service point).
    Waiting(usize),
    /// Reached the service point; ready to depart with coffee.
    Served,
}

/// Proof of a successful join.
///
/// Deliberately neither `Clone` nor `Copy`: [`QueueCoordinator::depart`]
/// consumes it, so every depart matches exactly one join.
///
/// [`QueueCoordinator::depart`]: crate::QueueCoordinator::depart
#[derive(Debug, PartialEq)]
pub struct QueueTicket {
    slot:      QueueSlot,
    tolerance: f64,
}

impl QueueTicket {
    pub(crate) fn new(start_slot: usize, tolerance: f64) -> Self {
        Self { slot: QueueSlot::Waiting(start_slot), tolerance }
    }

    #[inline]
    pub fn slot(&self) -> QueueSlot {
        self.slot
    }

    pub fn is_served(&self) -> bool {
        self.slot == QueueSlot::Served
    }

    /// Position of the slot the holder is walking toward.
    pub fn target(&self, slots: &[Point]) -> Option<Point> {
        match self.slot {
            QueueSlot::Waiting(i) => slots.get(i).copied(),
            QueueSlot::Served => None,
        }
    }

    /// Step forward in line once `position` is within tolerance of the
    /// current slot.  The slot index only ever decreases; reaching slot 0
    /// yields [`QueueSlot::Served`].
    pub fn advance(&mut self, position: Point, slots: &[Point]) -> QueueSlot {
        if let QueueSlot::Waiting(i) = self.slot {
            let reached = slots
                .get(i)
                .is_some_and(|&s| position.distance(s) < self.tolerance);
            if reached {
                self.slot = match i.checked_sub(1) {
                    Some(next) => QueueSlot::Waiting(next),
                    None => QueueSlot::Served,
                };
            }
        }
        self.slot
    }
}
