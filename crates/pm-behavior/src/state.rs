//! Lifecycle states.

use std::fmt;

/// Where an agent is in its café visit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LifecycleState {
    #[default]
    NotArrived,
    Arrived,
    Independent,
    IndependentQueueing,
    GoingToClassroom,
    Classroom,
    GoingToTable,
    Table,
    Dependent,
    Leaving,
    Out,
}

impl LifecycleState {
    pub const ALL: [LifecycleState; 11] = [
        LifecycleState::NotArrived,
        LifecycleState::Arrived,
        LifecycleState::Independent,
        LifecycleState::IndependentQueueing,
        LifecycleState::GoingToClassroom,
        LifecycleState::Classroom,
        LifecycleState::GoingToTable,
        LifecycleState::Table,
        LifecycleState::Dependent,
        LifecycleState::Leaving,
        LifecycleState::Out,
    ];

    /// Dense index in `0..ALL.len()`, for per-state counters.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleState::NotArrived          => "not_arrived",
            LifecycleState::Arrived             => "arrived",
            LifecycleState::Independent         => "independent",
            LifecycleState::IndependentQueueing => "independent_queueing",
            LifecycleState::GoingToClassroom    => "going_to_classroom",
            LifecycleState::Classroom           => "classroom",
            LifecycleState::GoingToTable        => "going_to_table",
            LifecycleState::Table               => "table",
            LifecycleState::Dependent           => "dependent",
            LifecycleState::Leaving             => "leaving",
            LifecycleState::Out                 => "out",
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self == LifecycleState::Out
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
