//! Shared configuration that every agent is spawned from.

use std::sync::Arc;

use pm_core::{AgentId, AgentRng, BehaviorGroup, Point, TableId, Tick};
use pm_geometry::RegionSet;
use pm_mobility::SpeedPolicy;
use pm_queue::QueueCoordinator;

use crate::config::MovementConfig;
use crate::error::{BehaviorError, BehaviorResult};
use crate::machine::AgentMovement;
use crate::state::LifecycleState;

/// The immutable, shareable half of the movement model.
///
/// Cloning is cheap (four `Arc`s and a seed).  [`spawn`](Self::spawn) pairs
/// a clone with fresh per-agent state.
#[derive(Clone)]
pub struct MovementPrototype {
    pub(crate) regions: Arc<RegionSet>,
    pub(crate) queue:   Arc<QueueCoordinator>,
    pub(crate) config:  Arc<MovementConfig>,
    pub(crate) speed:   Arc<dyn SpeedPolicy>,
    pub(crate) seed:    u64,
}

impl MovementPrototype {
    /// Validate `config` and create the café's queue from it.
    pub fn new(
        regions: Arc<RegionSet>,
        config: MovementConfig,
        speed: Arc<dyn SpeedPolicy>,
        seed: u64,
    ) -> BehaviorResult<Self> {
        config.validate()?;
        let queue = QueueCoordinator::new(config.queue_capacity, regions.slot_count())?
            .with_slot_tolerance(config.slot_tolerance)?;
        Ok(Self {
            regions,
            queue: Arc::new(queue),
            config: Arc::new(config),
            speed,
            seed,
        })
    }

    /// Use an existing queue instead of creating one.
    pub fn with_queue(mut self, queue: Arc<QueueCoordinator>) -> BehaviorResult<Self> {
        if queue.slot_count() != self.regions.slot_count() {
            return Err(BehaviorError::Config(format!(
                "queue has {} slots but the region set has {}",
                queue.slot_count(),
                self.regions.slot_count()
            )));
        }
        self.queue = queue;
        Ok(self)
    }

    pub fn regions(&self) -> &Arc<RegionSet> {
        &self.regions
    }

    pub fn queue(&self) -> &Arc<QueueCoordinator> {
        &self.queue
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A fresh agent in `NotArrived`, sharing this prototype's geometry and
    /// queue.
    pub fn spawn(&self, agent: AgentId, group: BehaviorGroup) -> AgentMovement {
        let mut rng = AgentRng::new(self.seed, agent);
        let spread = match self.config.arrival_spread {
            0 => 0,
            s => rng.gen_range(0..=s),
        };
        AgentMovement {
            proto: self.clone(),
            agent,
            group,
            rng,
            state: LifecycleState::NotArrived,
            last: Point::ORIGIN,
            initial: None,
            vinitial: None,
            table: TableId::INVALID,
            ticket: None,
            arrival_countdown: self.config.arrival_delay + spread,
            must_leave: false,
            class_ended: false,
            coffee_timer: 0,
            table_since: Tick::ZERO,
            stalled: 0,
            stall_reported: false,
        }
    }
}

impl std::fmt::Debug for MovementPrototype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovementPrototype")
            .field("queue", &self.queue)
            .field("config", &self.config)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
