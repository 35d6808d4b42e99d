//! End-of-run queue statistics.

use std::fmt;

use pm_core::BehaviorGroup;

/// Served / gave-up counters split by behaviour group.
///
/// A plain `Copy` snapshot; the live counters sit behind the coordinator's
/// mutex.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct QueueOutcomes {
    pub independent_served:  u64,
    pub dependent_served:    u64,
    pub independent_gave_up: u64,
    pub dependent_gave_up:   u64,
}

impl QueueOutcomes {
    pub fn served(&self, group: BehaviorGroup) -> u64 {
        match group {
            BehaviorGroup::Independent => self.independent_served,
            BehaviorGroup::Dependent => self.dependent_served,
        }
    }

    pub fn gave_up(&self, group: BehaviorGroup) -> u64 {
        match group {
            BehaviorGroup::Independent => self.independent_gave_up,
            BehaviorGroup::Dependent => self.dependent_gave_up,
        }
    }

    pub fn total_served(&self) -> u64 {
        self.independent_served + self.dependent_served
    }

    pub fn total_gave_up(&self) -> u64 {
        self.independent_gave_up + self.dependent_gave_up
    }

    pub(crate) fn record_served(&mut self, group: BehaviorGroup) {
        match group {
            BehaviorGroup::Independent => self.independent_served += 1,
            BehaviorGroup::Dependent => self.dependent_served += 1,
        }
    }

    pub(crate) fn record_gave_up(&mut self, group: BehaviorGroup) {
        match group {
            BehaviorGroup::Independent => self.independent_gave_up += 1,
            BehaviorGroup::Dependent => self.dependent_gave_up += 1,
        }
    }
}

impl fmt::Display for QueueOutcomes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ind served {} / gave up {}, dep served {} / gave up {}",
            self.independent_served,
            self.independent_gave_up,
            self.dependent_served,
            self.dependent_gave_up,
        )
    }
}
