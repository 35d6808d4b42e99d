//! Unit and scenario tests for pm-behavior.
//!
//! All tests use the hand-crafted café from `helpers` so they run without
//! any map files.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use pm_core::{AgentId, BehaviorGroup, Point, Tick};
    use pm_geometry::{Polygon, RegionSet, RegionSetBuilder};
    use pm_mobility::{FixedSpeed, Path};

    use crate::{AgentMovement, HostFlags, MovementConfig, MovementPrototype, TickContext};

    pub fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// 200 × 100 café: one table (100,40)–(110,50), queue slots at x = 150,
    /// y ∈ {20, 30, 40, 50}, classroom entrance at (30, 80).
    pub fn regions() -> Arc<RegionSet> {
        let mut b = RegionSetBuilder::new();
        b.bounds(200.0, 100.0)
            .allowed_zone(Polygon::rect(p(5.0, 5.0), p(195.0, 95.0)))
            .start_region(Polygon::rect(p(5.0, 5.0), p(30.0, 30.0)))
            .classroom(vec![p(20.0, 80.0), p(40.0, 80.0), p(40.0, 95.0), p(20.0, 95.0)])
            .queue_slots(vec![p(150.0, 20.0), p(150.0, 30.0), p(150.0, 40.0), p(150.0, 50.0)]);
        b.add_table(Polygon::rect(p(100.0, 40.0), p(110.0, 50.0)));
        Arc::new(b.build().unwrap())
    }

    pub fn proto(config: MovementConfig) -> MovementPrototype {
        MovementPrototype::new(regions(), config, Arc::new(FixedSpeed::new(1.0).unwrap()), 42)
            .unwrap()
    }

    /// Short timers so a whole visit fits in a few thousand ticks.
    pub fn fast_config() -> MovementConfig {
        MovementConfig {
            arrival_delay: 1,
            arrival_spread: 50,
            leave_after: 800,
            class_start: 100,
            class_duration: 100,
            coffee_drinking: 200,
            table_sitting: 30,
            ..MovementConfig::default()
        }
    }

    pub fn agent(config: MovementConfig, group: BehaviorGroup) -> AgentMovement {
        proto(config).spawn(AgentId(0), group)
    }

    pub fn step(agent: &mut AgentMovement, flags: &mut HostFlags, tick: u64) -> Path {
        agent.next_path(&mut TickContext::new(Tick(tick), flags))
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use crate::{BehaviorError, MovementConfig};

    #[test]
    fn defaults_validate() {
        let cfg = MovementConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.class_end(), 30_000);
        assert_eq!(cfg.queue_capacity, 10);
        assert_eq!(cfg.arrival_offset, (-10.0, 20.0));
    }

    #[test]
    fn rejects_bad_probability() {
        let cfg = MovementConfig { classroom_probability: 1.5, ..MovementConfig::default() };
        assert!(matches!(cfg.validate(), Err(BehaviorError::Config(_))));
    }

    #[test]
    fn rejects_zero_arrival_and_attempts() {
        let cfg = MovementConfig { arrival_delay: 0, ..MovementConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = MovementConfig { max_attempts: 0, ..MovementConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_radius() {
        let cfg = MovementConfig { queue_step: 0.0, ..MovementConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = MovementConfig { table_proximity: f64::NAN, ..MovementConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_leaving_radius_beyond_proximity() {
        let cfg = MovementConfig {
            leaving_sample_radius: 60.0,
            leaving_proximity: 40.0,
            ..MovementConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(BehaviorError::Config(_))));
        let cfg = MovementConfig {
            leaving_sample_radius: 40.0,
            leaving_proximity: 40.0,
            ..MovementConfig::default()
        };
        cfg.validate().unwrap();
    }
}

// ── Flags and states ──────────────────────────────────────────────────────────

#[cfg(test)]
mod flags {
    use crate::{HostFlags, LifecycleState};

    #[test]
    fn saw_coffee_is_consumed_once() {
        let mut f = HostFlags::new();
        assert!(!f.take_saw_coffee());
        f.notify_saw_coffee();
        assert!(f.saw_coffee());
        assert!(f.take_saw_coffee());
        assert!(!f.saw_coffee());
        assert!(!f.take_saw_coffee());
    }

    #[test]
    fn state_indices_are_dense() {
        for (i, s) in LifecycleState::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
        }
        assert_eq!(LifecycleState::IndependentQueueing.to_string(), "independent_queueing");
        assert!(LifecycleState::Out.is_terminal());
        assert_eq!(LifecycleState::default(), LifecycleState::NotArrived);
    }
}

// ── Prototype and replication ─────────────────────────────────────────────────

#[cfg(test)]
mod prototype {
    use std::sync::Arc;

    use pm_core::{AgentId, BehaviorGroup};
    use pm_queue::QueueCoordinator;

    use super::helpers::{p, proto, regions};
    use crate::{BehaviorError, LifecycleState, MovementConfig};

    #[test]
    fn spawn_starts_not_arrived() {
        let a = proto(MovementConfig::default()).spawn(AgentId(3), BehaviorGroup::Independent);
        assert_eq!(a.state(), LifecycleState::NotArrived);
        assert_eq!(a.agent(), AgentId(3));
        assert_eq!(a.group(), BehaviorGroup::Independent);
        assert_eq!(a.table(), None);
        assert_eq!(a.queue_slot(), None);
    }

    #[test]
    fn replicas_share_queue_and_regions() {
        let a = proto(MovementConfig::default()).spawn(AgentId(0), BehaviorGroup::Dependent);
        let b = a.replicate(AgentId(1), BehaviorGroup::Independent);
        assert!(Arc::ptr_eq(a.prototype().queue(), b.prototype().queue()));
        assert!(Arc::ptr_eq(a.prototype().regions(), b.prototype().regions()));
        assert_eq!(b.agent(), AgentId(1));
        assert_eq!(b.state(), LifecycleState::NotArrived);
    }

    #[test]
    fn replicas_have_independent_rngs() {
        let base = proto(MovementConfig::default());
        let mut a = base.spawn(AgentId(0), BehaviorGroup::Dependent);
        let mut b = a.replicate(AgentId(1), BehaviorGroup::Dependent);
        assert_ne!(a.initial_location().unwrap(), b.initial_location().unwrap());
    }

    #[test]
    fn initial_location_in_start_region() {
        let base = proto(MovementConfig::default());
        let r = regions();
        for i in 0..50 {
            let mut a = base.spawn(AgentId(i), BehaviorGroup::Dependent);
            let loc = a.initial_location().unwrap();
            assert!(r.in_start_region(loc));
            assert_eq!(a.last_waypoint(), loc);
        }
    }

    #[test]
    fn queue_from_config() {
        let cfg = MovementConfig { queue_capacity: 3, ..MovementConfig::default() };
        let base = proto(cfg);
        assert_eq!(base.queue().capacity(), 3);
        assert_eq!(base.queue().slot_count(), 4);
    }

    #[test]
    fn mismatched_queue_rejected() {
        let q = Arc::new(QueueCoordinator::new(10, 7).unwrap());
        let res = proto(MovementConfig::default()).with_queue(q);
        assert!(matches!(res, Err(BehaviorError::Config(_))));
    }

    #[test]
    fn unreachable_start_region_is_fatal() {
        use pm_geometry::{Polygon, RegionSetBuilder};
        use pm_mobility::FixedSpeed;

        let mut b = RegionSetBuilder::new();
        b.bounds(200.0, 100.0)
            .allowed_zone(Polygon::rect(p(5.0, 5.0), p(195.0, 95.0)))
            .start_region(Polygon::rect(p(10.0, 10.0), p(10.001, 10.001)))
            .classroom(vec![p(20.0, 80.0), p(40.0, 80.0)])
            .queue_slots(vec![p(150.0, 20.0), p(150.0, 30.0)]);
        b.add_table(Polygon::rect(p(100.0, 40.0), p(110.0, 50.0)));
        let cfg = MovementConfig { max_attempts: 10, ..MovementConfig::default() };
        let base = crate::MovementPrototype::new(
            Arc::new(b.build().unwrap()),
            cfg,
            Arc::new(FixedSpeed::new(1.0).unwrap()),
            0,
        )
        .unwrap();
        let mut a = base.spawn(AgentId(9), BehaviorGroup::Dependent);
        assert!(matches!(
            a.initial_location(),
            Err(BehaviorError::Placement { agent: AgentId(9), .. })
        ));
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use pm_core::{BehaviorGroup, TableId, Tick};
    use pm_queue::QueueSlot;

    use super::helpers::{agent, p, proto, step};
    use crate::{HostFlags, LifecycleState, MovementConfig};

    #[test]
    fn arrival_countdown_of_one() {
        let cfg = MovementConfig { arrival_delay: 1, ..MovementConfig::default() };
        let mut a = agent(cfg, BehaviorGroup::Dependent);
        let start = a.initial_location().unwrap();
        let mut flags = HostFlags::new();

        let path = step(&mut a, &mut flags, 0);
        assert_eq!(a.state(), LifecycleState::Arrived);
        assert_eq!(path.waypoints(), &[start, start.offset(-10.0, 20.0)]);
        assert_eq!(a.initial_point(), Some(start.offset(-10.0, 20.0)));
    }

    #[test]
    fn waits_out_arrival_delay() {
        let cfg = MovementConfig { arrival_delay: 3, ..MovementConfig::default() };
        let mut a = agent(cfg, BehaviorGroup::Dependent);
        a.initial_location().unwrap();
        let mut flags = HostFlags::new();
        assert!(step(&mut a, &mut flags, 0).is_stationary());
        assert!(step(&mut a, &mut flags, 1).is_stationary());
        assert_eq!(a.state(), LifecycleState::NotArrived);
        assert_eq!(step(&mut a, &mut flags, 2).waypoints().len(), 2);
        assert_eq!(a.state(), LifecycleState::Arrived);
    }

    #[test]
    fn arrived_falls_through_same_tick() {
        let mut a = agent(MovementConfig::default(), BehaviorGroup::Dependent);
        a.state = LifecycleState::Arrived;
        a.last = p(50.0, 50.0);
        let mut flags = HostFlags::new();
        let path = step(&mut a, &mut flags, 10);
        assert_eq!(a.state(), LifecycleState::Dependent);
        assert!(a.table().is_some());
        assert!(flags.can_be_influenced());
        assert_eq!(path.waypoints().len(), 2);
    }

    #[test]
    fn full_queue_gives_up() {
        let cfg = MovementConfig { queue_capacity: 1, ..MovementConfig::default() };
        let base = proto(cfg);
        let held = base.queue().try_join().unwrap();
        let mut a = base.spawn(pm_core::AgentId(0), BehaviorGroup::Independent);
        a.state = LifecycleState::Independent;
        a.last = p(150.0, 53.0);
        let mut flags = HostFlags::new();

        let path = step(&mut a, &mut flags, 10);
        assert_eq!(a.state(), LifecycleState::Dependent);
        assert!(path.end().distance(p(150.0, 50.0)) <= 5.0);
        let q = base.queue();
        assert_eq!(q.occupancy(), 1);
        assert_eq!(q.outcomes().independent_gave_up, 1);
        assert_eq!(q.outcomes().total_gave_up(), 1);
        q.depart(held, BehaviorGroup::Dependent);
    }

    #[test]
    fn table_exit_exactly_at_sitting_time() {
        let mut a = agent(MovementConfig::default(), BehaviorGroup::Independent);
        a.state = LifecycleState::Table;
        a.table_since = Tick(100);
        a.last = p(105.0, 60.0);
        let mut flags = HostFlags::new();

        assert!(step(&mut a, &mut flags, 5_099).is_stationary());
        assert_eq!(a.state(), LifecycleState::Table);
        assert!(step(&mut a, &mut flags, 5_100).is_stationary());
        assert_eq!(a.state(), LifecycleState::Leaving);
    }

    #[test]
    fn classroom_waits_for_class_end() {
        let mut a = agent(MovementConfig::default(), BehaviorGroup::Independent);
        a.state = LifecycleState::Classroom;
        a.last = p(75.0, 60.0);
        let mut flags = HostFlags::new();

        assert!(step(&mut a, &mut flags, 30_000).is_stationary());
        assert_eq!(a.state(), LifecycleState::Classroom);

        let path = step(&mut a, &mut flags, 30_001);
        assert_eq!(a.state(), LifecycleState::Dependent);
        assert_eq!(path.waypoints(), &[p(75.0, 60.0), p(30.0, 90.0)]);
        assert_eq!(a.last_waypoint(), p(30.0, 90.0));
    }

    #[test]
    fn near_entrance_steps_into_classroom() {
        let mut a = agent(MovementConfig::default(), BehaviorGroup::Independent);
        a.state = LifecycleState::GoingToClassroom;
        a.last = p(30.0, 70.0);
        let mut flags = HostFlags::new();
        let path = step(&mut a, &mut flags, 10);
        assert_eq!(a.state(), LifecycleState::Classroom);
        assert_eq!(path.end(), p(75.0, 50.0));
    }

    #[test]
    fn leaving_steps_out_to_pre_arrival_point() {
        let mut a = agent(MovementConfig::default(), BehaviorGroup::Dependent);
        a.state = LifecycleState::Leaving;
        a.initial = Some(p(10.0, 40.0));
        a.vinitial = Some(p(20.0, 20.0));
        a.last = p(15.0, 45.0);
        let mut flags = HostFlags::new();
        let path = step(&mut a, &mut flags, 40_000);
        assert_eq!(a.state(), LifecycleState::Out);
        assert_eq!(path.end(), p(20.0, 20.0));
        assert!(!flags.can_be_influenced());

        assert!(step(&mut a, &mut flags, 40_001).is_stationary());
        assert_eq!(a.state(), LifecycleState::Out);
    }

    #[test]
    fn dependent_leaves_after_deadline() {
        let mut a = agent(MovementConfig::default(), BehaviorGroup::Dependent);
        a.state = LifecycleState::Dependent;
        a.last = p(60.0, 60.0);
        let mut flags = HostFlags::new();
        step(&mut a, &mut flags, 32_000);
        assert_eq!(a.state(), LifecycleState::Dependent);
        step(&mut a, &mut flags, 32_001);
        assert_eq!(a.state(), LifecycleState::Leaving);
    }

    #[test]
    fn coffee_interrupt_forces_independent() {
        let mut a = agent(MovementConfig::default(), BehaviorGroup::Dependent);
        a.state = LifecycleState::Dependent;
        a.last = p(20.0, 20.0);
        let mut flags = HostFlags::new();
        step(&mut a, &mut flags, 10);
        assert!(flags.can_be_influenced());

        flags.notify_saw_coffee();
        step(&mut a, &mut flags, 11);
        assert!(matches!(
            a.state(),
            LifecycleState::Independent | LifecycleState::IndependentQueueing
        ));
        assert!(!flags.can_be_influenced());
        assert!(!flags.saw_coffee());
    }

    #[test]
    fn coffee_interrupt_ignored_in_line() {
        let base = proto(MovementConfig::default());
        let mut a = base.spawn(pm_core::AgentId(0), BehaviorGroup::Independent);
        a.state = LifecycleState::IndependentQueueing;
        a.ticket = base.queue().try_join();
        a.last = p(150.0, 48.0);
        let mut flags = HostFlags::new();

        flags.notify_saw_coffee();
        step(&mut a, &mut flags, 10);
        assert_eq!(a.state(), LifecycleState::IndependentQueueing);
        assert_eq!(a.queue_slot(), Some(QueueSlot::Waiting(2)));
        assert!(!flags.saw_coffee());
        assert_eq!(base.queue().occupancy(), 1);
    }

    #[test]
    fn coffee_countdown_clears_flag() {
        let mut a = agent(MovementConfig::default(), BehaviorGroup::Independent);
        a.state = LifecycleState::Out;
        a.coffee_timer = 2;
        let mut flags = HostFlags::new();
        flags.set_drinking_coffee(true);

        step(&mut a, &mut flags, 1);
        assert_eq!(a.coffee_remaining(), 1);
        assert!(flags.is_drinking_coffee());
        step(&mut a, &mut flags, 2);
        assert_eq!(a.coffee_remaining(), 0);
        assert!(flags.is_drinking_coffee());
        step(&mut a, &mut flags, 3);
        assert!(!flags.is_drinking_coffee());
    }

    #[test]
    fn exhaustion_holds_position_and_reports_stall() {
        let cfg = MovementConfig { max_attempts: 5, stall_warn_ticks: 3, ..MovementConfig::default() };
        let mut a = agent(cfg, BehaviorGroup::Independent);
        a.state = LifecycleState::Independent;
        // Standing exactly on the tail: no candidate can be strictly as close.
        a.last = p(150.0, 50.0);
        let mut flags = HostFlags::new();

        for t in 0..3 {
            let path = step(&mut a, &mut flags, t);
            assert!(path.is_stationary());
            assert_eq!(path.start(), p(150.0, 50.0));
        }
        assert_eq!(a.state(), LifecycleState::Independent);
        assert_eq!(a.stalled_ticks(), 3);
        assert!(a.stall_reported);
    }

    #[test]
    fn sits_down_at_exact_table_proximity() {
        let mut a = agent(MovementConfig::default(), BehaviorGroup::Dependent);
        a.state = LifecycleState::GoingToTable;
        a.table = TableId(0);
        // Table centroid is (105, 45); default proximity is 50.
        a.last = p(155.0, 45.0);
        let mut flags = HostFlags::new();

        let path = step(&mut a, &mut flags, 7);
        assert_eq!(a.state(), LifecycleState::Table);
        assert!(path.is_stationary());
        assert_eq!(a.table_since, Tick(7));
    }

    #[test]
    fn enters_classroom_at_exact_proximity() {
        let mut a = agent(MovementConfig::default(), BehaviorGroup::Independent);
        a.state = LifecycleState::GoingToClassroom;
        a.last = p(30.0, 55.0);
        let mut flags = HostFlags::new();

        let path = step(&mut a, &mut flags, 10);
        assert_eq!(a.state(), LifecycleState::Classroom);
        assert_eq!(path.waypoints(), &[p(30.0, 55.0), p(75.0, 35.0)]);
    }

    #[test]
    fn leaves_when_radius_equals_proximity() {
        let cfg = MovementConfig {
            leaving_sample_radius: 40.0,
            leaving_proximity: 40.0,
            ..MovementConfig::default()
        };
        let mut a = agent(cfg, BehaviorGroup::Dependent);
        a.state = LifecycleState::Leaving;
        a.initial = Some(p(60.0, 50.0));
        a.vinitial = Some(p(50.0, 30.0));
        a.last = p(100.0, 50.0);
        let mut flags = HostFlags::new();

        let path = step(&mut a, &mut flags, 10);
        assert_eq!(a.state(), LifecycleState::Out);
        assert_eq!(path.waypoints(), &[p(100.0, 50.0), p(50.0, 30.0)]);
    }

    #[test]
    fn leaving_from_just_outside_sample_radius() {
        let mut a = agent(MovementConfig::default(), BehaviorGroup::Dependent);
        a.state = LifecycleState::Leaving;
        a.initial = Some(p(60.0, 50.0));
        a.vinitial = Some(p(50.0, 30.0));
        a.last = p(90.0, 50.0);
        let mut flags = HostFlags::new();

        let mut t = 0;
        while a.state() == LifecycleState::Leaving {
            step(&mut a, &mut flags, t);
            t += 1;
            assert!(t < 50, "never left");
        }
        assert_eq!(a.state(), LifecycleState::Out);
        assert_eq!(a.last_waypoint(), p(50.0, 30.0));
    }
}

// ── Invariants ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use pm_core::{AgentId, BehaviorGroup, TableId};
    use pm_queue::QueueSlot;
    use proptest::prelude::*;

    use super::helpers::{fast_config, p, proto, regions, step};
    use crate::{HostFlags, LifecycleState, MovementConfig};

    #[test]
    fn queue_slots_only_decrease_and_serve_once() {
        let base = proto(MovementConfig::default());
        let mut a = base.spawn(AgentId(0), BehaviorGroup::Independent);
        a.state = LifecycleState::Independent;
        a.last = p(120.0, 60.0);
        let mut flags = HostFlags::new();

        let mut slots = Vec::new();
        let mut t = 0;
        while a.state() != LifecycleState::IndependentQueueing {
            step(&mut a, &mut flags, t);
            t += 1;
            assert!(t < 1_000, "never joined");
        }
        assert_eq!(base.queue().occupancy(), 1);
        while a.state() == LifecycleState::IndependentQueueing {
            if let Some(QueueSlot::Waiting(i)) = a.queue_slot() {
                slots.push(i);
            }
            let path = step(&mut a, &mut flags, t);
            assert!((path.speed() - 0.5).abs() < 1e-12);
            t += 1;
            assert!(t < 5_000, "never served");
        }

        assert!(slots.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(slots.first(), Some(&2));
        assert_eq!(slots.last(), Some(&0));
        assert!(matches!(
            a.state(),
            LifecycleState::GoingToClassroom | LifecycleState::GoingToTable
        ));
        assert_eq!(a.queue_slot(), None);
        assert!(flags.is_drinking_coffee());
        assert_eq!(a.coffee_remaining(), 50_000);

        let q = base.queue();
        assert_eq!(q.occupancy(), 0);
        assert_eq!(q.outcomes().independent_served, 1);
        // Stepped sideways out of the line.
        assert!((a.last_waypoint().x - 150.0).abs() > 30.0);
    }

    #[test]
    fn whole_visits_terminate() {
        let base = proto(fast_config());
        let r = regions();
        let mut agents: Vec<_> = (0..10)
            .map(|i| {
                let group = if i % 2 == 0 { BehaviorGroup::Independent } else { BehaviorGroup::Dependent };
                base.spawn(AgentId(i), group)
            })
            .collect();
        let mut flags = vec![HostFlags::new(); agents.len()];
        for a in &mut agents {
            assert!(r.in_start_region(a.initial_location().unwrap()));
        }

        for t in 0..6_000 {
            for (a, f) in agents.iter_mut().zip(flags.iter_mut()) {
                let path = step(a, f, t);
                assert!(!path.waypoints().is_empty());
                assert_eq!(path.end(), a.last_waypoint());
            }
        }
        for a in &agents {
            assert_eq!(a.state(), LifecycleState::Out, "{a:?}");
        }
        assert_eq!(base.queue().occupancy(), 0);
        assert_eq!(base.queue().outcomes().independent_served, 5);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        /// Dependent wandering stays in the allowed zone and never cuts
        /// through an obstacle.
        #[test]
        fn dependent_paths_are_contained(seed in any::<u64>()) {
            let r = regions();
            let base = crate::MovementPrototype::new(
                r.clone(),
                MovementConfig::default(),
                std::sync::Arc::new(pm_mobility::FixedSpeed::new(1.0).unwrap()),
                seed,
            ).unwrap();
            let mut a = base.spawn(AgentId(0), BehaviorGroup::Dependent);
            a.state = LifecycleState::Dependent;
            a.last = p(50.0, 50.0);
            let mut flags = HostFlags::new();
            for t in 0..100 {
                let path = step(&mut a, &mut flags, t);
                let w = path.waypoints();
                prop_assert!(r.in_allowed_zone(path.end()));
                prop_assert!(!r.crosses_restricted(w[0], path.end()));
            }
        }

        /// Every sampled waypoint in the goal-directed states stays inside the
        /// allowed zone and gets no farther from its target.  States that
        /// sample with the restriction check never cut through an obstacle.
        /// Scripted step-in and step-out waypoints are exempt.
        #[test]
        fn directed_states_are_contained(
            seed in any::<u64>(),
            which in 0..4usize,
            start in prop::sample::select(vec![(20.0, 20.0), (60.0, 70.0), (180.0, 85.0), (130.0, 15.0)]),
        ) {
            let r = regions();
            let base = crate::MovementPrototype::new(
                r.clone(),
                MovementConfig::default(),
                std::sync::Arc::new(pm_mobility::FixedSpeed::new(1.0).unwrap()),
                seed,
            ).unwrap();
            let initial = p(20.0, 30.0);
            let (state, target, clear) = match which {
                0 => (LifecycleState::Independent, r.queue_tail(), false),
                1 => (LifecycleState::GoingToTable, r.table(TableId(0)).unwrap(), true),
                2 => (LifecycleState::GoingToClassroom, r.classroom_entrance(), true),
                _ => (LifecycleState::Leaving, initial, true),
            };
            let mut a = base.spawn(AgentId(0), BehaviorGroup::Independent);
            a.state = state;
            a.table = TableId(0);
            a.initial = Some(initial);
            a.vinitial = Some(p(25.0, 15.0));
            a.last = p(start.0, start.1);
            let mut flags = HostFlags::new();

            let mut t = 0;
            while a.state() == state && t < 300 {
                let path = step(&mut a, &mut flags, t);
                t += 1;
                let w = path.waypoints();
                let scripted_exit = matches!(a.state(), LifecycleState::Classroom | LifecycleState::Out);
                let sampled = match (scripted_exit, w.len()) {
                    (false, 2) | (true, 3) => w[1],
                    _ => continue,
                };
                prop_assert!(r.in_allowed_zone(sampled), "{state} left the zone at {sampled}");
                prop_assert!(sampled.distance(target) <= w[0].distance(target));
                if clear {
                    prop_assert!(!r.crosses_restricted(w[0], sampled), "{state} crossed {} -> {sampled}", w[0]);
                }
            }
            prop_assert!(a.state() != state, "{state} never finished from {start:?}");
        }

        /// Each accepted sample while heading for the queue is no farther
        /// from the tail than the last waypoint.
        #[test]
        fn independent_approach_is_monotone(seed in any::<u64>()) {
            let base = crate::MovementPrototype::new(
                regions(),
                MovementConfig::default(),
                std::sync::Arc::new(pm_mobility::FixedSpeed::new(1.0).unwrap()),
                seed,
            ).unwrap();
            let tail = base.regions().queue_tail();
            let mut a = base.spawn(AgentId(0), BehaviorGroup::Independent);
            a.state = LifecycleState::Independent;
            a.last = p(20.0, 20.0);
            let mut flags = HostFlags::new();
            let mut t = 0;
            while a.state() == LifecycleState::Independent && t < 500 {
                let before = a.last_waypoint().distance(tail);
                step(&mut a, &mut flags, t);
                prop_assert!(a.last_waypoint().distance(tail) <= before);
                t += 1;
            }
        }
    }
}
