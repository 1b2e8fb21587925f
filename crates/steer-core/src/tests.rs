//! Unit tests for steer-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, ObstacleId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(AgentId::default(), AgentId::INVALID);
        assert_eq!(ObstacleId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(ObstacleId(3).to_string(), "ObstacleId(3)");
    }
}

#[cfg(test)]
mod vector {
    use crate::Vec3;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn normalize_zero_is_zero() {
        let n = Vec3::ZERO.normalized();
        assert_eq!(n, Vec3::ZERO);
        assert!(n.is_finite());
    }

    #[test]
    fn normalize_has_unit_length() {
        let n = Vec3::new(3.0, 4.0, 0.0).normalized();
        assert!(approx(n.length(), 1.0));
        assert!(approx(n.x, 0.6));
        assert!(approx(n.y, 0.8));
    }

    #[test]
    fn limited_clamps_only_when_longer() {
        let v = Vec3::xy(150.0, 0.0);
        assert_eq!(v.limited(100.0), Vec3::xy(100.0, 0.0));
        let short = Vec3::xy(3.0, 4.0);
        assert_eq!(short.limited(100.0), short);
        assert_eq!(Vec3::ZERO.limited(0.0), Vec3::ZERO);
    }

    #[test]
    fn perpendiculars_are_orthogonal() {
        let v = Vec3::xy(2.0, 1.0);
        assert_eq!(v.perp_ccw(), Vec3::xy(-1.0, 2.0));
        assert_eq!(v.perp_cw(), Vec3::xy(1.0, -2.0));
        assert!(approx(v.dot(v.perp_ccw()), 0.0));
    }

    #[test]
    fn arithmetic_and_distance() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 6.0, 3.0);
        assert_eq!(b - a, Vec3::new(3.0, 4.0, 0.0));
        assert!(approx(a.distance(b), 5.0));
        assert_eq!(-a * 2.0, Vec3::new(-2.0, -4.0, -6.0));
        let s: Vec3 = [a, b].into_iter().sum();
        assert_eq!(s, Vec3::new(5.0, 8.0, 6.0));
    }

    #[test]
    fn with_length_rescales() {
        let v = Vec3::xy(0.0, 2.0).with_length(5.0);
        assert!(approx(v.y, 5.0));
    }
}

#[cfg(test)]
mod bounds {
    use crate::{SteerError, Vec3, WorldBounds};

    #[test]
    fn degenerate_bounds_are_rejected() {
        assert!(WorldBounds::default().validate().is_ok());
        assert_eq!(
            WorldBounds::from_size(0.0, 600.0).validate(),
            Err(SteerError::InvalidBounds { width: 0.0, height: 600.0 })
        );
        assert!(WorldBounds::new(f32::INFINITY, 10.0).validate().is_err());
    }

    #[test]
    fn default_is_800_by_600() {
        let b = WorldBounds::default();
        assert_eq!(b.width(), 800.0);
        assert_eq!(b.height(), 600.0);
    }

    #[test]
    fn wrap_teleports_to_opposite_edge() {
        let b = WorldBounds::default();
        assert_eq!(b.wrap(Vec3::xy(401.0, 0.0)), Vec3::xy(-400.0, 0.0));
        assert_eq!(b.wrap(Vec3::xy(0.0, -300.5)), Vec3::xy(0.0, 300.0));
        assert_eq!(b.wrap(Vec3::xy(-410.0, 310.0)), Vec3::xy(400.0, -300.0));
    }

    #[test]
    fn wrap_leaves_inside_points_alone() {
        let b = WorldBounds::default();
        let p = Vec3::new(399.0, -299.0, 7.0);
        assert_eq!(b.wrap(p), p);
        assert!(b.contains(p));
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, SteerError, Tick, WorldBounds, check_dt};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(0.5);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert!((clock.elapsed_secs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn clock_sums_the_steps_actually_taken() {
        let mut clock = SimClock::new(0.1);
        clock.advance_by(1.0);
        clock.advance_by(0.5);
        clock.advance();
        assert_eq!(clock.current_tick, Tick(3));
        assert!((clock.elapsed_secs() - 1.6).abs() < 1e-6);
        assert_eq!(clock.to_string(), "T3 (1.60s)");
    }

    #[test]
    fn dt_must_be_finite_and_positive() {
        assert_eq!(check_dt(0.25), Ok(0.25));
        assert_eq!(check_dt(0.0), Err(SteerError::InvalidTimeStep(0.0)));
        assert!(check_dt(-1.0).is_err());
        assert!(check_dt(f32::NAN).is_err());
        assert!(check_dt(f32::INFINITY).is_err());
    }

    #[test]
    fn config_validation() {
        assert!(SimConfig::default().validate().is_ok());
        let bad_dt = SimConfig { dt_secs: 0.0, ..Default::default() };
        assert_eq!(bad_dt.validate(), Err(SteerError::InvalidTimeStep(0.0)));
        let bad_bounds = SimConfig { bounds: WorldBounds::new(-1.0, 10.0), ..Default::default() };
        assert!(matches!(bad_bounds.validate(), Err(SteerError::InvalidBounds { .. })));
    }

    #[test]
    fn config_defaults() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.end_tick(), Tick(cfg.total_ticks));
        assert!(cfg.dt_secs > 0.0);
        assert!(!cfg.record_contributions);
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng, WorldBounds};

    #[test]
    fn agent_rng_is_deterministic() {
        let mut a = AgentRng::new(99, AgentId(5));
        let mut b = AgentRng::new(99, AgentId(5));
        assert_eq!(a.unit_heading(), b.unit_heading());
    }

    #[test]
    fn agents_get_distinct_streams() {
        let mut a = AgentRng::new(99, AgentId(0));
        let mut b = AgentRng::new(99, AgentId(1));
        assert_ne!(a.unit_heading(), b.unit_heading());
    }

    #[test]
    fn unit_heading_is_unit_and_planar() {
        let mut r = AgentRng::new(1, AgentId(0));
        for _ in 0..32 {
            let h = r.unit_heading();
            assert!((h.length() - 1.0).abs() < 1e-4);
            assert_eq!(h.z, 0.0);
        }
    }

    #[test]
    fn point_in_respects_margin() {
        let bounds = WorldBounds::default();
        let mut r = SimRng::new(3);
        for _ in 0..64 {
            let p = r.point_in(&bounds, 50.0);
            assert!(p.x.abs() <= 350.0 && p.y.abs() <= 250.0);
        }
    }
}
