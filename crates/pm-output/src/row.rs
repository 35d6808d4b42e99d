//! Plain data row types written by output backends.

/// Queue occupancy at a sampled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueSampleRow {
    pub tick:      u64,
    pub occupancy: u64,
}

/// One coffee-influence delivery: `from` was drinking, `to` noticed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfluenceRow {
    pub tick: u64,
    pub from: u32,
    pub to:   u32,
}

/// One agent's lifecycle state and position at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id: u32,
    pub tick:     u64,
    /// `LifecycleState::as_str`, e.g. `"independent_queueing"`.
    pub state:    &'static str,
    pub x:        f64,
    pub y:        f64,
}

/// End-of-run queue statistics for one behavior group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeRow {
    /// `"ind"` or `"dep"`.
    pub group:   &'static str,
    pub served:  u64,
    pub gave_up: u64,
}
