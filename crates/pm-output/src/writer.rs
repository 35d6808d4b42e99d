//! The `OutputWriter` trait implemented by all backend writers.

use crate::{AgentSnapshotRow, InfluenceRow, OutcomeRow, OutputResult, QueueSampleRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are stored by the observer and retrieved with
/// [`ReportObserver::take_error`](crate::ReportObserver::take_error).
pub trait OutputWriter {
    fn write_queue_sample(&mut self, row: &QueueSampleRow) -> OutputResult<()>;

    fn write_influence(&mut self, row: &InfluenceRow) -> OutputResult<()>;

    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Write the end-of-run statistics, one row per behavior group.
    fn write_outcomes(&mut self, rows: &[OutcomeRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
