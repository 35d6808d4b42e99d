//! Unit tests for pm-mobility.

#[cfg(test)]
mod path {
    use pm_core::Point;
    use crate::Path;

    #[test]
    fn anchored_path_is_stationary() {
        let here = Point::new(4.0, 2.0);
        let p = Path::anchored(1.0, here);
        assert!(p.is_stationary());
        assert_eq!(p.start(), here);
        assert_eq!(p.end(), here);
        assert_eq!(p.length(), 0.0);
    }

    #[test]
    fn waypoints_keep_order() {
        let mut p = Path::anchored(1.2, Point::new(0.0, 0.0));
        p.add_waypoint(Point::new(3.0, 4.0));
        let p = p.with_waypoint(Point::new(3.0, 0.0));
        assert_eq!(p.waypoints().len(), 3);
        assert_eq!(p.end(), Point::new(3.0, 0.0));
        assert!((p.length() - 9.0).abs() < 1e-12);
        assert_eq!(p.speed(), 1.2);
    }

    #[test]
    fn point_at_interpolates_and_clamps() {
        let p = Path::anchored(1.0, Point::new(0.0, 0.0))
            .with_waypoint(Point::new(10.0, 0.0))
            .with_waypoint(Point::new(10.0, 10.0));
        assert_eq!(p.point_at(5.0), Point::new(5.0, 0.0));
        assert_eq!(p.point_at(15.0), Point::new(10.0, 5.0));
        assert_eq!(p.point_at(100.0), Point::new(10.0, 10.0));
        assert_eq!(p.point_at(-3.0), Point::new(0.0, 0.0));
    }
}

#[cfg(test)]
mod speed {
    use pm_core::{AgentId, AgentRng};
    use crate::{FixedSpeed, MobilityError, SpeedPolicy, UniformSpeed};

    #[test]
    fn uniform_within_range() {
        let s = UniformSpeed::new(0.8, 1.4).unwrap();
        let mut rng = AgentRng::new(9, AgentId(3));
        for _ in 0..1000 {
            let v = s.generate(&mut rng);
            assert!((0.8..=1.4).contains(&v));
        }
    }

    #[test]
    fn degenerate_range_is_fixed() {
        let s = UniformSpeed::new(1.0, 1.0).unwrap();
        let mut rng = AgentRng::new(0, AgentId(0));
        assert_eq!(s.generate(&mut rng), 1.0);
    }

    #[test]
    fn rejects_bad_speeds() {
        assert!(matches!(UniformSpeed::new(2.0, 1.0), Err(MobilityError::EmptyRange { .. })));
        assert!(matches!(UniformSpeed::new(0.0, 1.0), Err(MobilityError::InvalidSpeed(_))));
        assert!(matches!(FixedSpeed::new(f64::INFINITY), Err(MobilityError::InvalidSpeed(_))));
    }

    #[test]
    fn fixed_ignores_rng() {
        let s = FixedSpeed::new(1.3).unwrap();
        let mut rng = AgentRng::new(0, AgentId(0));
        assert_eq!(s.generate(&mut rng), 1.3);
        assert_eq!(s.generate(&mut rng), 1.3);
    }
}
