//! Movement model parameters.
//!
//! Durations are in ticks; distances and offsets are in map units.  The
//! defaults reproduce the café scenario the model was calibrated on.

use crate::error::{BehaviorError, BehaviorResult};

/// Every tunable of the agent state machine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementConfig {
    // ── Timers ────────────────────────────────────────────────────────────
    /// Ticks an agent waits before arriving.
    pub arrival_delay: u64,
    /// Extra arrival delay drawn uniformly from `0..=arrival_spread` per
    /// agent.  0 makes every agent arrive on the same tick.
    pub arrival_spread: u64,
    /// Agents still wandering after this tick head for the exit.
    pub leave_after: u64,
    pub class_start: u64,
    pub class_duration: u64,
    /// How long the "is drinking coffee" flag stays up after service.
    pub coffee_drinking: u64,
    pub table_sitting: u64,

    // ── Choices ───────────────────────────────────────────────────────────
    /// Chance a served agent takes its coffee to the classroom rather than
    /// to its table.
    pub classroom_probability: f64,

    // ── Queue ─────────────────────────────────────────────────────────────
    pub queue_capacity: usize,
    /// Distance from the tail at which an agent tries to join.
    pub queue_join_radius: f64,
    /// Distance covered per tick while shuffling forward in line.
    pub queue_step: f64,
    /// Distance under which an agent counts as standing on its slot.
    pub slot_tolerance: f64,
    /// Lateral step out of the line after service (+x classroom, −x table).
    pub queue_exit_offset: f64,

    // ── Proximities ───────────────────────────────────────────────────────
    pub classroom_proximity: f64,
    pub table_proximity: f64,
    /// While leaving, sampling stops once within this distance of the
    /// arrival point.  Must not exceed `leaving_proximity`.
    pub leaving_sample_radius: f64,
    /// While leaving, the agent steps out once within this distance.
    pub leaving_proximity: f64,

    // ── Scripted offsets (dx, dy) ─────────────────────────────────────────
    pub arrival_offset: (f64, f64),
    pub classroom_step_in: (f64, f64),
    pub classroom_exit: (f64, f64),

    // ── Sampling ──────────────────────────────────────────────────────────
    /// Candidate draws per sampling call before giving up for the tick.
    pub max_attempts: u32,
    /// Consecutive held ticks after which an agent is reported as stalled.
    pub stall_warn_ticks: u64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            arrival_delay:         5_500,
            arrival_spread:        0,
            leave_after:           32_000,
            class_start:           20_000,
            class_duration:        10_000,
            coffee_drinking:       50_000,
            table_sitting:         5_000,
            classroom_probability: 0.5,
            queue_capacity:        pm_queue::DEFAULT_CAPACITY,
            queue_join_radius:     5.0,
            queue_step:            0.10,
            slot_tolerance:        pm_queue::DEFAULT_SLOT_TOLERANCE,
            queue_exit_offset:     35.0,
            classroom_proximity:   25.0,
            table_proximity:       50.0,
            leaving_sample_radius: 25.0,
            leaving_proximity:     40.0,
            arrival_offset:        (-10.0, 20.0),
            classroom_step_in:     (45.0, -20.0),
            classroom_exit:        (-45.0, 30.0),
            max_attempts:          pm_geometry::DEFAULT_MAX_ATTEMPTS,
            stall_warn_ticks:      100,
        }
    }
}

impl MovementConfig {
    /// Tick after which a class in session has ended.
    #[inline]
    pub fn class_end(&self) -> u64 {
        self.class_start + self.class_duration
    }

    /// Reject configurations the state machine cannot run with.
    pub fn validate(&self) -> BehaviorResult<()> {
        if self.arrival_delay == 0 {
            return Err(config("arrival_delay must be at least 1 tick"));
        }
        if !(0.0..=1.0).contains(&self.classroom_probability) {
            return Err(config(format!(
                "classroom_probability must be in [0, 1], got {}",
                self.classroom_probability
            )));
        }
        if self.queue_capacity == 0 {
            return Err(config("queue_capacity must be at least 1"));
        }
        if self.max_attempts == 0 {
            return Err(config("max_attempts must be at least 1"));
        }
        if self.stall_warn_ticks == 0 {
            return Err(config("stall_warn_ticks must be at least 1"));
        }
        for (name, v) in [
            ("queue_join_radius", self.queue_join_radius),
            ("queue_step", self.queue_step),
            ("slot_tolerance", self.slot_tolerance),
            ("classroom_proximity", self.classroom_proximity),
            ("table_proximity", self.table_proximity),
            ("leaving_sample_radius", self.leaving_sample_radius),
            ("leaving_proximity", self.leaving_proximity),
        ] {
            if !(v > 0.0 && v.is_finite()) {
                return Err(config(format!("{name} must be positive and finite, got {v}")));
            }
        }
        for (name, (dx, dy)) in [
            ("arrival_offset", self.arrival_offset),
            ("classroom_step_in", self.classroom_step_in),
            ("classroom_exit", self.classroom_exit),
        ] {
            if !(dx.is_finite() && dy.is_finite()) {
                return Err(config(format!("{name} must be finite")));
            }
        }
        if self.leaving_sample_radius > self.leaving_proximity {
            return Err(config(format!(
                "leaving_sample_radius ({}) must not exceed leaving_proximity ({})",
                self.leaving_sample_radius, self.leaving_proximity
            )));
        }
        if !self.queue_exit_offset.is_finite() {
            return Err(config("queue_exit_offset must be finite"));
        }
        Ok(())
    }
}

fn config(msg: impl Into<String>) -> BehaviorError {
    BehaviorError::Config(msg.into())
}
