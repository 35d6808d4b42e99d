//! cafe: a morning at the campus café.
//!
//! Forty people arrive over the first hour of a 40 000-tick morning.  Roughly
//! a third head straight for the counter; the rest wander until they see
//! someone with a coffee.  Reports land in `output/cafe/`.
//!
//! Set `RUST_LOG=pm_behavior=debug` to follow every state transition.

mod layout;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use pm_behavior::{AgentMovement, LifecycleState, MovementConfig, MovementPrototype};
use pm_core::{AgentId, BehaviorGroup, SimConfig, Tick};
use pm_mobility::UniformSpeed;
use pm_output::{CsvWriter, OutputWriter, ReportObserver};
use pm_queue::QueueOutcomes;
use pm_sim::{InfluenceRule, SimBuilder, SimObserver, TickSummary};

use layout::{CLASSROOM_EXIT, CLASSROOM_STEP_IN, build_cafe};

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT:           usize = 40;
const SEED:                  u64   = 42;
const TOTAL_TICKS:           u64   = 40_000;
const INDEPENDENT_FRACTION:  f64   = 0.35;
const OUTPUT_INTERVAL_TICKS: u64   = 500;
const PROGRESS_INTERVAL:     u64   = 5_000;
const OUTPUT_DIR:            &str  = "output/cafe";

// ── Observer wrapper for progress and counts ─────────────────────────────────

struct ProgressObserver<W: OutputWriter> {
    inner:         ReportObserver<W>,
    influences:    usize,
    snapshot_rows: usize,
    peak_queue:    usize,
}

impl<W: OutputWriter> ProgressObserver<W> {
    fn new(inner: ReportObserver<W>) -> Self {
        Self { inner, influences: 0, snapshot_rows: 0, peak_queue: 0 }
    }
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_influence(&mut self, tick: Tick, from: AgentId, to: AgentId) {
        self.influences += 1;
        tracing::info!("{from} influenced {to} at {tick}");
        self.inner.on_influence(tick, from, to);
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        self.peak_queue = self.peak_queue.max(summary.occupancy);
        if tick.0.is_multiple_of(PROGRESS_INTERVAL) {
            tracing::info!(
                %tick,
                in_line = summary.occupancy,
                wandering = summary.count(LifecycleState::Dependent),
                seated = summary.count(LifecycleState::Table),
                in_class = summary.count(LifecycleState::Classroom),
                out = summary.count(LifecycleState::Out),
                stalled = summary.stalled,
                "progress"
            );
        }
        self.inner.on_tick_end(tick, summary);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[AgentMovement]) {
        self.snapshot_rows += agents.len();
        self.inner.on_snapshot(tick, agents);
    }

    fn on_sim_end(&mut self, final_tick: Tick, outcomes: &QueueOutcomes) {
        self.inner.on_sim_end(final_tick, outcomes);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("=== cafe — pedestrian mobility generator ===");
    println!("Agents: {AGENT_COUNT}  |  Ticks: {TOTAL_TICKS}  |  Seed: {SEED}");
    println!();

    // 1. Floor plan.
    let regions = Arc::new(build_cafe()?);
    println!(
        "Floor plan: {} tables, {} queue slots, {} restricted polygons",
        regions.table_count(),
        regions.slot_count(),
        regions.restricted().len(),
    );

    // 2. Movement model.  Arrivals spread over the first hour.
    let movement = MovementConfig {
        arrival_spread: 3_600,
        classroom_step_in: CLASSROOM_STEP_IN,
        classroom_exit: CLASSROOM_EXIT,
        ..MovementConfig::default()
    };
    let prototype = MovementPrototype::new(regions, movement, Arc::new(UniformSpeed::default()), SEED)?;

    // 3. Sim config.
    let config = SimConfig {
        total_ticks:           TOTAL_TICKS,
        seed:                  SEED,
        output_interval_ticks: OUTPUT_INTERVAL_TICKS,
        sample_interval_ticks: 60,
    };

    // 4. Build sim.
    let mut sim = SimBuilder::new(config.clone(), prototype)
        .agent_count(AGENT_COUNT)
        .independent_fraction(INDEPENDENT_FRACTION)
        .influence(InfluenceRule::new(15.0, 0.05)?)
        .build()?;
    let independent = sim.agents.iter().filter(|a| a.group() == BehaviorGroup::Independent).count();
    println!("Groups: {independent} independent, {} dependent", AGENT_COUNT - independent);
    println!();

    // 5. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = ProgressObserver::new(ReportObserver::new(writer, &config));

    // 6. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 7. Summary.
    let outcomes = sim.outcomes();
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  influence events     : {}", obs.influences);
    println!("  agent_snapshots.csv  : {} rows", obs.snapshot_rows);
    println!("  peak queue occupancy : {}", obs.peak_queue);
    println!();
    println!("{:<8} {:>6} {:>8}", "Group", "Got", "Gave up");
    println!("{}", "-".repeat(24));
    for g in BehaviorGroup::ALL {
        println!("{:<8} {:>6} {:>8}", g.as_str(), outcomes.served(g), outcomes.gave_up(g));
    }
    println!();

    // 8. Where everyone ended up.
    println!("{:<22} {:>6}", "State", "Agents");
    println!("{}", "-".repeat(29));
    for state in LifecycleState::ALL {
        let n = sim.agents.iter().filter(|a| a.state() == state).count();
        if n > 0 {
            println!("{:<22} {:>6}", state.as_str(), n);
        }
    }

    Ok(())
}
