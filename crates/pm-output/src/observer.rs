//! `ReportObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use pm_behavior::AgentMovement;
use pm_core::{AgentId, BehaviorGroup, SimConfig, Tick};
use pm_queue::QueueOutcomes;
use pm_sim::{SimObserver, TickSummary};

use crate::row::{AgentSnapshotRow, InfluenceRow, OutcomeRow, QueueSampleRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes queue samples, influence events, agent
/// snapshots and final queue statistics to any [`OutputWriter`] backend.
///
/// Queue occupancy is sampled every `config.sample_interval_ticks` ticks
/// (0 disables sampling).  Snapshots follow the simulation's own output
/// interval.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct ReportObserver<W: OutputWriter> {
    writer:          W,
    sample_interval: u64,
    last_error:      Option<OutputError>,
}

impl<W: OutputWriter> ReportObserver<W> {
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            sample_interval: config.sample_interval_ticks,
            last_error:      None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for ReportObserver<W> {
    fn on_influence(&mut self, tick: Tick, from: AgentId, to: AgentId) {
        let row = InfluenceRow { tick: tick.0, from: from.0, to: to.0 };
        let result = self.writer.write_influence(&row);
        self.store_err(result);
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        if self.sample_interval == 0 || !tick.0.is_multiple_of(self.sample_interval) {
            return;
        }
        let row = QueueSampleRow { tick: tick.0, occupancy: summary.occupancy as u64 };
        let result = self.writer.write_queue_sample(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[AgentMovement]) {
        let rows: Vec<AgentSnapshotRow> = agents
            .iter()
            .map(|a| {
                let p = a.last_waypoint();
                AgentSnapshotRow {
                    agent_id: a.agent().0,
                    tick:     tick.0,
                    state:    a.state().as_str(),
                    x:        p.x,
                    y:        p.y,
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick, outcomes: &QueueOutcomes) {
        let rows: Vec<OutcomeRow> = BehaviorGroup::ALL
            .iter()
            .map(|&g| OutcomeRow {
                group:   g.as_str(),
                served:  outcomes.served(g),
                gave_up: outcomes.gave_up(g),
            })
            .collect();
        let result = self.writer.write_outcomes(&rows);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
