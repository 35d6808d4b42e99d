//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `queue_samples.csv`
//! - `influence_events.csv`
//! - `agent_snapshots.csv`
//! - `queue_outcomes.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, InfluenceRow, OutcomeRow, OutputResult, QueueSampleRow};

/// Writes reports to four CSV files.
pub struct CsvWriter {
    samples:    Writer<File>,
    influences: Writer<File>,
    snapshots:  Writer<File>,
    outcomes:   Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut samples = Writer::from_path(dir.join("queue_samples.csv"))?;
        samples.write_record(["tick", "occupancy"])?;

        let mut influences = Writer::from_path(dir.join("influence_events.csv"))?;
        influences.write_record(["tick", "from", "to"])?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(["agent_id", "tick", "state", "x", "y"])?;

        let mut outcomes = Writer::from_path(dir.join("queue_outcomes.csv"))?;
        outcomes.write_record(["group", "served", "gave_up"])?;

        Ok(Self {
            samples,
            influences,
            snapshots,
            outcomes,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_queue_sample(&mut self, row: &QueueSampleRow) -> OutputResult<()> {
        self.samples
            .write_record(&[row.tick.to_string(), row.occupancy.to_string()])?;
        Ok(())
    }

    fn write_influence(&mut self, row: &InfluenceRow) -> OutputResult<()> {
        self.influences.write_record(&[
            row.tick.to_string(),
            row.from.to_string(),
            row.to.to_string(),
        ])?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.state.to_owned(),
                format!("{:.3}", row.x),
                format!("{:.3}", row.y),
            ])?;
        }
        Ok(())
    }

    fn write_outcomes(&mut self, rows: &[OutcomeRow]) -> OutputResult<()> {
        for row in rows {
            self.outcomes.write_record(&[
                row.group.to_owned(),
                row.served.to_string(),
                row.gave_up.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.samples.flush()?;
        self.influences.flush()?;
        self.snapshots.flush()?;
        self.outcomes.flush()?;
        Ok(())
    }
}
