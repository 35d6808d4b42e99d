//! `pm-output`: report writers for the pedestrian café mobility generator.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                                                  |
//! |-----------|---------|----------------------------------------------------------------|
//! | *(none)*  | CSV     | `queue_samples.csv`, `influence_events.csv`, `agent_snapshots.csv`, `queue_outcomes.csv` |
//! | `sqlite`  | SQLite  | `output.db`                                                    |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`ReportObserver`], which implements `pm_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pm_output::{CsvWriter, ReportObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = ReportObserver::new(writer, &config);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ReportObserver;
pub use row::{AgentSnapshotRow, InfluenceRow, OutcomeRow, QueueSampleRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
