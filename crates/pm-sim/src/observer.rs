//! Simulation observer trait for progress reporting and data collection.

use pm_behavior::{AgentMovement, LifecycleState};
use pm_core::{AgentId, Tick};
use pm_queue::QueueOutcomes;

/// What happened during one tick, handed to [`SimObserver::on_tick_end`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Agents in line after the tick.
    pub occupancy: usize,
    /// Agents per state, indexed by [`LifecycleState::index`].
    pub state_counts: [usize; LifecycleState::ALL.len()],
    /// Agents holding position because their sampler ran dry.
    pub stalled: usize,
    /// Influence events delivered this tick.
    pub influenced: usize,
}

impl TickSummary {
    pub fn count(&self, state: LifecycleState) -> usize {
        self.state_counts[state.index()]
    }
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {} in line", summary.occupancy);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any agent moves.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called whenever a coffee drinker influences a nearby agent.
    fn on_influence(&mut self, _tick: Tick, _from: AgentId, _to: AgentId) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with read-only access to every agent.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &[AgentMovement]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _outcomes: &QueueOutcomes) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
