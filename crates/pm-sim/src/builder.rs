//! Fluent builder for constructing a [`Sim`].

use pm_behavior::{HostFlags, MovementPrototype};
use pm_core::{AgentId, BehaviorGroup, SimConfig, SimRng, Tick};
use pm_mobility::Path;

use crate::{InfluenceRule, Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, snapshot and sample intervals
/// - [`MovementPrototype`]: regions, queue, movement config, speed policy
/// - the population, via `.groups(v)` or `.agent_count(n)`
///
/// # Optional inputs (have defaults)
///
/// | Method                       | Default                          |
/// |------------------------------|----------------------------------|
/// | `.independent_fraction(f)`   | `0.5` (only with `agent_count`)  |
/// | `.influence(rule)`           | `InfluenceRule::default()`       |
/// | `.without_influence()`       | influence enabled                |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, prototype)
///     .agent_count(40)
///     .independent_fraction(0.3)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:      SimConfig,
    prototype:   MovementPrototype,
    groups:      Option<Vec<BehaviorGroup>>,
    agent_count: Option<usize>,
    fraction:    f64,
    influence:   Option<InfluenceRule>,
}

impl SimBuilder {
    pub fn new(config: SimConfig, prototype: MovementPrototype) -> Self {
        Self {
            config,
            prototype,
            groups:      None,
            agent_count: None,
            fraction:    0.5,
            influence:   Some(InfluenceRule::default()),
        }
    }

    /// Explicit behavior group per agent, in `AgentId` order.
    pub fn groups(mut self, groups: Vec<BehaviorGroup>) -> Self {
        self.groups = Some(groups);
        self
    }

    /// Number of agents.  Without `.groups(v)`, each agent's group is drawn
    /// from the simulation seed using `independent_fraction`.
    pub fn agent_count(mut self, n: usize) -> Self {
        self.agent_count = Some(n);
        self
    }

    /// Chance that a drawn agent is independent.
    pub fn independent_fraction(mut self, f: f64) -> Self {
        self.fraction = f;
        self
    }

    pub fn influence(mut self, rule: InfluenceRule) -> Self {
        self.influence = Some(rule);
        self
    }

    /// Disable coffee influence entirely.
    pub fn without_influence(mut self) -> Self {
        self.influence = None;
        self
    }

    /// Validate inputs, spawn and place every agent, and return a
    /// ready-to-run [`Sim`].
    ///
    /// Placement failure for any agent aborts the build.
    pub fn build(self) -> SimResult<Sim> {
        let mut rng = SimRng::new(self.config.seed);

        // ── Resolve the population ────────────────────────────────────────
        let groups = match (self.groups, self.agent_count) {
            (Some(g), Some(n)) if g.len() != n => {
                return Err(SimError::AgentCountMismatch {
                    expected: n,
                    got:      g.len(),
                    what:     "behavior groups",
                });
            }
            (Some(g), _) => g,
            (None, Some(n)) => {
                if !(0.0..=1.0).contains(&self.fraction) {
                    return Err(SimError::Config(format!(
                        "independent fraction must be in [0, 1], got {}",
                        self.fraction
                    )));
                }
                (0..n)
                    .map(|_| {
                        if rng.gen_bool(self.fraction) {
                            BehaviorGroup::Independent
                        } else {
                            BehaviorGroup::Dependent
                        }
                    })
                    .collect()
            }
            (None, None) => {
                return Err(SimError::Config(
                    "population not set: call .groups(v) or .agent_count(n)".into(),
                ));
            }
        };
        if groups.is_empty() {
            return Err(SimError::Config("at least one agent is required".into()));
        }
        if let Some(rule) = &self.influence {
            rule.validate()?;
        }

        // ── Spawn and place ───────────────────────────────────────────────
        let mut agents = Vec::with_capacity(groups.len());
        for (i, &group) in groups.iter().enumerate() {
            let id = AgentId::try_from(i)
                .map_err(|_| SimError::Config(format!("agent index {i} exceeds AgentId range")))?;
            let mut agent = self.prototype.spawn(id, group);
            agent.initial_location()?;
            agents.push(agent);
        }

        let independent = groups.iter().filter(|g| g.is_independent()).count();
        tracing::info!(
            agents = agents.len(),
            independent,
            dependent = agents.len() - independent,
            total_ticks = self.config.total_ticks,
            influence = self.influence.is_some(),
            "simulation built"
        );

        let n = agents.len();
        let paths = agents.iter().map(|a| Path::anchored(0.0, a.last_waypoint())).collect();
        Ok(Sim {
            config:    self.config,
            current:   Tick::ZERO,
            queue:     self.prototype.queue().clone(),
            prototype: self.prototype,
            agents,
            flags:     vec![HostFlags::new(); n],
            paths,
            influence: self.influence,
            rng,
        })
    }
}
