//! The `Sim` struct and its tick loop.

use std::sync::Arc;

use pm_behavior::{AgentMovement, HostFlags, MovementPrototype, TickContext};
use pm_core::{AgentId, SimConfig, SimRng, Tick};
use pm_mobility::Path;
use pm_queue::{QueueCoordinator, QueueOutcomes};

use crate::influence::NeighborGrid;
use crate::{InfluenceRule, SimObserver, SimResult, TickSummary};

/// The host: owns every agent and its flags, and drives the tick loop.
///
/// Each tick runs three phases:
///
/// 1. **Movement** (optionally parallel with the `parallel` feature): every
///    agent's [`AgentMovement::next_path`] is called with its own flags.
/// 2. **Influence** (sequential, ascending `AgentId`): coffee drinkers notify
///    eligible neighbours within the rule's radius.
/// 3. **Report**: a [`TickSummary`] goes to the observer, plus a snapshot on
///    output intervals.
///
/// Influence delivered in tick `t` is consumed by the receiver in tick `t+1`.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config: SimConfig,

    /// The tick the next call to `run` or `run_ticks` will process.
    pub current: Tick,

    /// Agents in `AgentId` order.
    pub agents: Vec<AgentMovement>,

    /// Host flags, parallel to `agents`.
    pub flags: Vec<HostFlags>,

    /// The path each agent returned on the most recent tick.
    pub paths: Vec<Path>,

    /// `None` disables the influence phase.
    pub influence: Option<InfluenceRule>,

    pub queue: Arc<QueueCoordinator>,

    pub(crate) prototype: MovementPrototype,

    /// Draws for influence delivery.
    pub(crate) rng: SimRng,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        tracing::info!(from = %self.current, to = %self.config.end_tick(), "run started");
        while self.current < self.config.end_tick() {
            self.step(observer);
        }
        let outcomes = self.queue.outcomes();
        tracing::info!(tick = %self.current, %outcomes, "run finished");
        observer.on_sim_end(self.current, &outcomes);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    pub fn agent(&self, id: AgentId) -> Option<&AgentMovement> {
        self.agents.get(id.index())
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn prototype(&self) -> &MovementPrototype {
        &self.prototype
    }

    pub fn outcomes(&self) -> QueueOutcomes {
        self.queue.outcomes()
    }

    /// `true` once every agent has left.
    pub fn all_out(&self) -> bool {
        self.agents.iter().all(|a| a.state().is_terminal())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.current;
        observer.on_tick_start(now);

        self.movement_phase(now);
        let influenced = self.influence_phase(now, observer);

        let summary = self.summarize(influenced);
        observer.on_tick_end(now, &summary);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.agents);
        }

        self.current = now + 1;
    }

    fn movement_phase(&mut self, now: Tick) {
        #[cfg(not(feature = "parallel"))]
        {
            for ((agent, flags), path) in
                self.agents.iter_mut().zip(self.flags.iter_mut()).zip(self.paths.iter_mut())
            {
                let mut ctx = TickContext::new(now, flags);
                *path = agent.next_path(&mut ctx);
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.agents
                .par_iter_mut()
                .zip(self.flags.par_iter_mut())
                .zip(self.paths.par_iter_mut())
                .for_each(|((agent, flags), path)| {
                    let mut ctx = TickContext::new(now, flags);
                    *path = agent.next_path(&mut ctx);
                });
        }
    }

    /// Deliver coffee influence.  Returns the number of deliveries.
    ///
    /// Senders are visited in ascending `AgentId` order, receivers in
    /// ascending order within each sender, so a fixed seed gives a fixed
    /// event sequence.  A receiver already holding an undelivered signal is
    /// skipped.
    fn influence_phase<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> usize {
        let Some(rule) = self.influence else {
            return 0;
        };

        let grid = NeighborGrid::build(
            rule.radius,
            self.agents
                .iter()
                .enumerate()
                .filter(|&(i, _)| self.flags[i].can_be_influenced())
                .map(|(i, a)| (i, a.last_waypoint())),
        );
        if grid.is_empty() {
            return 0;
        }

        let mut delivered = 0;
        for from in 0..self.agents.len() {
            if !self.flags[from].is_drinking_coffee() {
                continue;
            }
            let origin = self.agents[from].last_waypoint();
            for to in grid.near(origin) {
                if to == from || self.flags[to].saw_coffee() {
                    continue;
                }
                if self.agents[to].last_waypoint().distance(origin) > rule.radius {
                    continue;
                }
                if !self.rng.gen_bool(rule.probability) {
                    continue;
                }
                self.flags[to].notify_saw_coffee();
                let (from_id, to_id) = (self.agents[from].agent(), self.agents[to].agent());
                tracing::debug!(tick = %now, from = %from_id, to = %to_id, "coffee influence");
                observer.on_influence(now, from_id, to_id);
                delivered += 1;
            }
        }
        delivered
    }

    fn summarize(&self, influenced: usize) -> TickSummary {
        let mut summary = TickSummary {
            occupancy: self.queue.occupancy(),
            influenced,
            ..TickSummary::default()
        };
        for agent in &self.agents {
            summary.state_counts[agent.state().index()] += 1;
            if agent.stalled_ticks() > 0 {
                summary.stalled += 1;
            }
        }
        debug_assert_eq!(summary.state_counts.iter().sum::<usize>(), self.agents.len());
        summary
    }
}
