//! `AgentMovement`: one agent's café visit as a state machine.
//!
//! # Tick order
//!
//! [`AgentMovement::next_path`] runs, in order:
//!
//! 1. timers: must-leave, class-ended, coffee countdown;
//! 2. the coffee interrupt: a pending `saw_coffee` forces `Independent`;
//! 3. exactly one state handler, which returns the next state and the path.
//!
//! A handler whose sampler runs out of attempts leaves the state unchanged
//! and the agent holds position for the tick.

use pm_core::{AgentId, AgentRng, BehaviorGroup, Point, TableId, Tick};
use pm_geometry::{ConstrainedSampler, SampleConstraint, SampleError, advance_toward};
use pm_mobility::Path;
use pm_queue::{QueueSlot, QueueTicket};

use crate::context::TickContext;
use crate::error::{BehaviorError, BehaviorResult};
use crate::prototype::MovementPrototype;
use crate::state::LifecycleState;

type Step = Result<(LifecycleState, Path), SampleError>;

/// Per-agent mutable movement state.  Create with
/// [`MovementPrototype::spawn`].
pub struct AgentMovement {
    pub(crate) proto: MovementPrototype,
    pub(crate) agent: AgentId,
    pub(crate) group: BehaviorGroup,
    pub(crate) rng:   AgentRng,

    pub(crate) state: LifecycleState,
    pub(crate) last:  Point,
    /// Arrival point, the target while leaving.
    pub(crate) initial: Option<Point>,
    /// Pre-arrival position, where the agent exits to.
    pub(crate) vinitial: Option<Point>,
    pub(crate) table:  TableId,
    pub(crate) ticket: Option<QueueTicket>,

    pub(crate) arrival_countdown: u64,
    pub(crate) must_leave:        bool,
    pub(crate) class_ended:       bool,
    pub(crate) coffee_timer:      u64,
    pub(crate) table_since:       Tick,

    pub(crate) stalled:        u64,
    pub(crate) stall_reported: bool,
}

impl AgentMovement {
    // ── Host-facing operations ────────────────────────────────────────────

    /// Another independent agent sharing this one's geometry and queue.
    pub fn replicate(&self, agent: AgentId, group: BehaviorGroup) -> AgentMovement {
        self.proto.spawn(agent, group)
    }

    /// Place the agent uniformly inside the start region.
    ///
    /// Called once before the first tick.  Failure means the start region
    /// is too small to hit and is a setup error.
    pub fn initial_location(&mut self) -> BehaviorResult<Point> {
        let sampler = ConstrainedSampler::new(&self.proto.regions, self.proto.config.max_attempts);
        let p = sampler
            .sample(&mut self.rng, SampleConstraint::StartRegion)
            .map_err(|source| BehaviorError::Placement { agent: self.agent, source })?;
        self.last = p;
        Ok(p)
    }

    /// Advance one tick and return the path to walk.  Never fails.
    pub fn next_path(&mut self, ctx: &mut TickContext<'_>) -> Path {
        let cfg = &self.proto.config;
        let now = ctx.tick.0;

        if now > cfg.leave_after {
            self.must_leave = true;
        }
        if now > cfg.class_end() {
            self.class_ended = true;
        }
        if self.coffee_timer > 0 {
            self.coffee_timer -= 1;
        } else {
            ctx.flags.set_drinking_coffee(false);
        }

        if ctx.flags.take_saw_coffee() {
            if self.ticket.is_some() {
                tracing::debug!(agent = %self.agent, "coffee interrupt ignored while queueing");
            } else {
                ctx.flags.set_can_be_influenced(false);
                self.state = LifecycleState::Independent;
            }
        }

        let prev = self.state;
        let speed = self.proto.speed.generate(&mut self.rng);
        let path = match self.dispatch(ctx, speed) {
            Ok((next, path)) => {
                self.state = next;
                self.stalled = 0;
                self.stall_reported = false;
                path
            }
            Err(err) => {
                self.hold(ctx.tick, err);
                Path::anchored(speed, self.last)
            }
        };

        if self.state != prev {
            tracing::debug!(
                agent = %self.agent,
                tick = %ctx.tick,
                from = %prev,
                to = %self.state,
                "state transition"
            );
        }
        path
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn agent(&self) -> AgentId {
        self.agent
    }

    pub fn group(&self) -> BehaviorGroup {
        self.group
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn last_waypoint(&self) -> Point {
        self.last
    }

    pub fn initial_point(&self) -> Option<Point> {
        self.initial
    }

    /// Assigned table, once the agent has arrived.
    pub fn table(&self) -> Option<TableId> {
        (self.table != TableId::INVALID).then_some(self.table)
    }

    /// Place in line, while queueing.
    pub fn queue_slot(&self) -> Option<QueueSlot> {
        self.ticket.as_ref().map(QueueTicket::slot)
    }

    pub fn coffee_remaining(&self) -> u64 {
        self.coffee_timer
    }

    /// Consecutive ticks spent holding position after sampler exhaustion.
    pub fn stalled_ticks(&self) -> u64 {
        self.stalled
    }

    pub fn prototype(&self) -> &MovementPrototype {
        &self.proto
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    fn dispatch(&mut self, ctx: &mut TickContext<'_>, speed: f64) -> Step {
        match self.state {
            LifecycleState::NotArrived          => Ok(self.on_not_arrived(speed)),
            LifecycleState::Arrived             => self.on_arrived(ctx, speed),
            LifecycleState::Independent         => self.on_independent(speed),
            LifecycleState::IndependentQueueing => Ok(self.on_queueing(ctx, speed)),
            LifecycleState::GoingToClassroom    => self.on_going_to_classroom(speed),
            LifecycleState::Classroom           => Ok(self.on_classroom(speed)),
            LifecycleState::GoingToTable        => self.on_going_to_table(ctx.tick, speed),
            LifecycleState::Table               => Ok(self.on_table(ctx.tick, speed)),
            LifecycleState::Dependent           => self.on_dependent(ctx, speed),
            LifecycleState::Leaving             => self.on_leaving(ctx, speed),
            LifecycleState::Out                 => Ok(self.on_out(ctx, speed)),
        }
    }

    fn sample(&mut self, constraint: SampleConstraint) -> Result<Point, SampleError> {
        ConstrainedSampler::new(&self.proto.regions, self.proto.config.max_attempts)
            .sample(&mut self.rng, constraint)
    }

    fn hold(&mut self, tick: Tick, err: SampleError) {
        self.stalled += 1;
        tracing::warn!(
            agent = %self.agent,
            state = %self.state,
            tick = %tick,
            error = %err,
            "sampler exhausted, holding position"
        );
        if self.stalled >= self.proto.config.stall_warn_ticks && !self.stall_reported {
            self.stall_reported = true;
            tracing::error!(
                agent = %self.agent,
                state = %self.state,
                ticks = self.stalled,
                "agent stalled: geometry leaves no reachable waypoint"
            );
        }
    }

    /// `[last, c]`, moving the agent to `c`.  Skips the duplicate when the
    /// agent stays put.
    fn walk_to(&mut self, speed: f64, c: Point) -> Path {
        let mut path = Path::anchored(speed, self.last);
        if c != self.last {
            path.add_waypoint(c);
        }
        self.last = c;
        path
    }

    // ── Handlers ──────────────────────────────────────────────────────────

    fn on_not_arrived(&mut self, speed: f64) -> (LifecycleState, Path) {
        self.arrival_countdown = self.arrival_countdown.saturating_sub(1);
        if self.arrival_countdown > 0 {
            return (LifecycleState::NotArrived, Path::anchored(speed, self.last));
        }
        let (dx, dy) = self.proto.config.arrival_offset;
        let before = self.last;
        let arrived = before.offset(dx, dy);
        self.vinitial = Some(before);
        self.initial = Some(arrived);
        (LifecycleState::Arrived, self.walk_to(speed, arrived))
    }

    fn on_arrived(&mut self, ctx: &mut TickContext<'_>, speed: f64) -> Step {
        self.table = self.random_table();
        // The branch handler runs in this same tick.
        self.state = if self.group.is_independent() {
            LifecycleState::Independent
        } else {
            LifecycleState::Dependent
        };
        self.dispatch(ctx, speed)
    }

    fn on_independent(&mut self, speed: f64) -> Step {
        let target = self.proto.regions.queue_tail();
        let c = self.sample(SampleConstraint::Directed { from: self.last, target })?;

        let mut next = LifecycleState::Independent;
        if c.distance(target) <= self.proto.config.queue_join_radius {
            match self.proto.queue.try_join() {
                Some(ticket) => {
                    self.ticket = Some(ticket);
                    next = LifecycleState::IndependentQueueing;
                }
                None => {
                    self.proto.queue.give_up(self.group);
                    next = LifecycleState::Dependent;
                }
            }
        }
        Ok((next, self.walk_to(speed, c)))
    }

    fn on_queueing(&mut self, ctx: &mut TickContext<'_>, speed: f64) -> (LifecycleState, Path) {
        let speed = speed / 2.0;
        let regions = &self.proto.regions;
        let cfg = &self.proto.config;

        let Some(ticket) = self.ticket.as_mut() else {
            tracing::error!(agent = %self.agent, "queueing without a ticket");
            return (LifecycleState::Dependent, Path::anchored(speed, self.last));
        };

        let slots = regions.queue_slots();
        let target = ticket.target(slots).unwrap_or(self.last);
        let mut next_pos = advance_toward(self.last, target, cfg.queue_step);

        if ticket.advance(next_pos, slots) != QueueSlot::Served {
            return (LifecycleState::IndependentQueueing, self.walk_to(speed, next_pos));
        }

        if let Some(ticket) = self.ticket.take() {
            self.proto.queue.depart(ticket, self.group);
        }
        self.coffee_timer = cfg.coffee_drinking;
        ctx.flags.set_drinking_coffee(true);

        let offset = cfg.queue_exit_offset;
        let next = if self.rng.gen_bool(cfg.classroom_probability) {
            next_pos = next_pos.offset(offset, 0.0);
            LifecycleState::GoingToClassroom
        } else {
            next_pos = next_pos.offset(-offset, 0.0);
            LifecycleState::GoingToTable
        };
        (next, self.walk_to(speed, next_pos))
    }

    fn on_going_to_classroom(&mut self, speed: f64) -> Step {
        let entrance = self.proto.regions.classroom_entrance();
        let proximity = self.proto.config.classroom_proximity;

        let c = if self.last.distance(entrance) > proximity {
            self.sample(SampleConstraint::DirectedClear { from: self.last, target: entrance })?
        } else {
            self.last
        };

        if c.distance(entrance) <= proximity {
            let (dx, dy) = self.proto.config.classroom_step_in;
            let mut path = self.walk_to(speed, c);
            let inside = c.offset(dx, dy);
            path.add_waypoint(inside);
            self.last = inside;
            return Ok((LifecycleState::Classroom, path));
        }
        Ok((LifecycleState::GoingToClassroom, self.walk_to(speed, c)))
    }

    fn on_classroom(&mut self, speed: f64) -> (LifecycleState, Path) {
        if !self.class_ended {
            return (LifecycleState::Classroom, Path::anchored(speed, self.last));
        }
        let (dx, dy) = self.proto.config.classroom_exit;
        let exit = self.last.offset(dx, dy);
        (LifecycleState::Dependent, self.walk_to(speed, exit))
    }

    fn on_going_to_table(&mut self, tick: Tick, speed: f64) -> Step {
        let center = self.table_center();
        let proximity = self.proto.config.table_proximity;

        let c = if self.last.distance(center) > proximity {
            self.sample(SampleConstraint::DirectedClear { from: self.last, target: center })?
        } else {
            self.last
        };

        let next = if c.distance(center) <= proximity {
            self.table_since = tick;
            LifecycleState::Table
        } else {
            LifecycleState::GoingToTable
        };
        Ok((next, self.walk_to(speed, c)))
    }

    fn on_table(&mut self, tick: Tick, speed: f64) -> (LifecycleState, Path) {
        let next = if tick.since(self.table_since) >= self.proto.config.table_sitting {
            LifecycleState::Leaving
        } else {
            LifecycleState::Table
        };
        (next, Path::anchored(speed, self.last))
    }

    fn on_dependent(&mut self, ctx: &mut TickContext<'_>, speed: f64) -> Step {
        ctx.flags.set_can_be_influenced(true);
        let c = self.sample(SampleConstraint::FreeClear { from: self.last })?;
        let next = if self.must_leave {
            LifecycleState::Leaving
        } else {
            LifecycleState::Dependent
        };
        Ok((next, self.walk_to(speed, c)))
    }

    fn on_leaving(&mut self, ctx: &mut TickContext<'_>, speed: f64) -> Step {
        ctx.flags.set_can_be_influenced(false);
        let cfg = &self.proto.config;
        let (sample_radius, proximity) = (cfg.leaving_sample_radius, cfg.leaving_proximity);
        let initial = self.initial.unwrap_or(self.last);

        let c = if self.last.distance(initial) > sample_radius {
            self.sample(SampleConstraint::DirectedClear { from: self.last, target: initial })?
        } else {
            self.last
        };

        if c.distance(initial) <= proximity {
            let exit = self.vinitial.unwrap_or(initial);
            let mut path = self.walk_to(speed, c);
            path.add_waypoint(exit);
            self.last = exit;
            return Ok((LifecycleState::Out, path));
        }
        Ok((LifecycleState::Leaving, self.walk_to(speed, c)))
    }

    fn on_out(&mut self, ctx: &mut TickContext<'_>, speed: f64) -> (LifecycleState, Path) {
        ctx.flags.set_can_be_influenced(false);
        (LifecycleState::Out, Path::anchored(speed, self.last))
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn random_table(&mut self) -> TableId {
        self.rng
            .index(self.proto.regions.table_count())
            .and_then(|i| TableId::try_from(i).ok())
            .unwrap_or(TableId(0))
    }

    fn table_center(&mut self) -> Point {
        if let Some(center) = self.proto.regions.table(self.table) {
            return center;
        }
        self.table = self.random_table();
        self.proto.regions.table(self.table).unwrap_or(self.last)
    }
}

impl std::fmt::Debug for AgentMovement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentMovement")
            .field("agent", &self.agent)
            .field("group", &self.group)
            .field("state", &self.state)
            .field("last", &self.last)
            .field("table", &self.table)
            .field("ticket", &self.ticket)
            .finish_non_exhaustive()
    }
}
