//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! four tables mirroring the CSV files.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, InfluenceRow, OutcomeRow, OutputResult, QueueSampleRow};

/// Writes reports to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS queue_samples (
                 tick      INTEGER PRIMARY KEY,
                 occupancy INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS influence_events (
                 tick     INTEGER NOT NULL,
                 from_id  INTEGER NOT NULL,
                 to_id    INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS agent_snapshots (
                 agent_id INTEGER NOT NULL,
                 tick     INTEGER NOT NULL,
                 state    TEXT    NOT NULL,
                 x        REAL    NOT NULL,
                 y        REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS queue_outcomes (
                 grp     TEXT PRIMARY KEY,
                 served  INTEGER NOT NULL,
                 gave_up INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_queue_sample(&mut self, row: &QueueSampleRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO queue_samples (tick, occupancy) VALUES (?1, ?2)",
            rusqlite::params![row.tick, row.occupancy],
        )?;
        Ok(())
    }

    fn write_influence(&mut self, row: &InfluenceRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO influence_events (tick, from_id, to_id) VALUES (?1, ?2, ?3)",
            rusqlite::params![row.tick, row.from, row.to],
        )?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_snapshots (agent_id, tick, state, x, y) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.agent_id, row.tick, row.state, row.x, row.y])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_outcomes(&mut self, rows: &[OutcomeRow]) -> OutputResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO queue_outcomes (grp, served, gave_up) \
                 VALUES (?1, ?2, ?3)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.group, row.served, row.gave_up])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
