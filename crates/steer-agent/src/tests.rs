//! Unit tests for steer-agent.

#[cfg(test)]
mod tunables {
    use steer_core::AgentId;

    use crate::{AgentError, AgentTunables};

    #[test]
    fn defaults_match_reference_values() {
        let t = AgentTunables::default();
        assert_eq!(t.max_speed, 200.0);
        assert_eq!(t.max_force, 100.0);
        assert_eq!(t.mass, 1.0);
        assert!(t.validate(AgentId(0)).is_ok());
    }

    #[test]
    fn rejects_non_positive_mass() {
        let t = AgentTunables { mass: 0.0, ..Default::default() };
        assert!(matches!(
            t.validate(AgentId(4)),
            Err(AgentError::InvalidTunables { agent: AgentId(4), field: "mass", .. })
        ));
    }

    #[test]
    fn rejects_negative_and_nan() {
        let neg = AgentTunables { radius: -1.0, ..Default::default() };
        assert!(matches!(
            neg.validate(AgentId(0)),
            Err(AgentError::InvalidTunables { field: "radius", value, .. }) if value == -1.0
        ));
        let nan = AgentTunables { max_force: f32::NAN, ..Default::default() };
        assert!(matches!(
            nan.validate(AgentId(0)),
            Err(AgentError::InvalidTunables { field: "max_force", .. })
        ));
    }

    #[test]
    fn snapshot_copies_every_field() {
        let t = AgentTunables::new(150.0, 80.0, 2.0, 12.0);
        let c = t.snapshot();
        assert_eq!((c.max_speed, c.max_force, c.mass, c.radius), (150.0, 80.0, 2.0, 12.0));
    }
}

#[cfg(test)]
mod builder {
    use crate::{AgentError, AgentStoreBuilder, AgentTunables};
    use steer_core::{AgentId, Vec3};

    #[test]
    fn correct_count() {
        let (store, rngs) = AgentStoreBuilder::new(500, 1).build().unwrap();
        assert_eq!(store.count, 500);
        assert_eq!(rngs.len(), 500);
    }

    #[test]
    fn zero_agents() {
        let (store, rngs) = AgentStoreBuilder::new(0, 0).build().unwrap();
        assert!(store.is_empty());
        assert!(rngs.is_empty());
    }

    #[test]
    fn zero_velocity_gets_half_max_speed_heading() {
        let tunables = AgentTunables { max_speed: 160.0, ..Default::default() };
        let (store, _) = AgentStoreBuilder::new(8, 7)
            .uniform_tunables(tunables)
            .build()
            .unwrap();
        for v in &store.velocity {
            assert!((v.length() - 80.0).abs() < 1e-3, "got {}", v.length());
        }
    }

    #[test]
    fn explicit_velocity_is_kept() {
        let (store, _) = AgentStoreBuilder::new(2, 0)
            .velocities(vec![Vec3::xy(5.0, 0.0), Vec3::ZERO])
            .build()
            .unwrap();
        assert_eq!(store.velocity[0], Vec3::xy(5.0, 0.0));
        assert!(!store.velocity[1].is_zero());
    }

    #[test]
    fn initial_heading_is_deterministic() {
        let (a, _) = AgentStoreBuilder::new(4, 99).build().unwrap();
        let (b, _) = AgentStoreBuilder::new(4, 99).build().unwrap();
        assert_eq!(a.velocity, b.velocity);
    }

    #[test]
    fn length_mismatch_is_reported() {
        let err = AgentStoreBuilder::new(3, 0)
            .positions(vec![Vec3::ZERO])
            .build()
            .err()
            .unwrap();
        assert!(matches!(
            err,
            AgentError::LengthMismatch { what: "positions", expected: 3, got: 1 }
        ));
    }

    #[test]
    fn invalid_tunables_name_the_agent() {
        let mut t = vec![AgentTunables::default(); 3];
        t[2].mass = -1.0;
        let err = AgentStoreBuilder::new(3, 0).tunables(t).build().err().unwrap();
        assert!(matches!(err, AgentError::InvalidTunables { agent: AgentId(2), field: "mass", .. }));
        assert_eq!(err.to_string(), "agent AgentId(2): mass must be finite and >= 0 (got -1)");
    }
}

#[cfg(test)]
mod store {
    use crate::{AgentError, AgentStoreBuilder, AgentTunables};
    use steer_core::{AgentId, Vec3};

    #[test]
    fn agent_ids_iterator() {
        let (store, _) = AgentStoreBuilder::new(3, 0).build().unwrap();
        let ids: Vec<AgentId> = store.agent_ids().collect();
        assert_eq!(ids, vec![AgentId(0), AgentId(1), AgentId(2)]);
    }

    #[test]
    fn push_appends_new_id() {
        let (mut store, mut rngs) = AgentStoreBuilder::new(2, 0).build().unwrap();
        let id = store.push(Vec3::xy(1.0, 1.0), Vec3::X, AgentTunables::default());
        rngs.push(id);
        assert_eq!(id, AgentId(2));
        assert_eq!(store.count, 3);
        assert_eq!(rngs.len(), 3);
        assert_eq!(store.position[2], Vec3::xy(1.0, 1.0));
    }

    #[test]
    fn remove_keeps_ids_stable() {
        let (mut store, _) = AgentStoreBuilder::new(3, 0).build().unwrap();
        store.remove(AgentId(1)).unwrap();
        assert!(!store.is_alive(AgentId(1)));
        assert_eq!(store.live_count(), 2);
        let live: Vec<AgentId> = store.live_ids().collect();
        assert_eq!(live, vec![AgentId(0), AgentId(2)]);
        assert!(matches!(store.remove(AgentId(1)), Err(AgentError::NotFound(_))));
        assert!(matches!(store.remove(AgentId(9)), Err(AgentError::NotFound(_))));
    }
}

#[cfg(test)]
mod rngs {
    use crate::AgentStoreBuilder;
    use steer_core::AgentId;

    #[test]
    fn different_seeds_differ() {
        let (_, mut a) = AgentStoreBuilder::new(1, 1).build().unwrap();
        let (_, mut b) = AgentStoreBuilder::new(1, 2).build().unwrap();
        assert_ne!(
            a.get_mut(AgentId(0)).unit_heading(),
            b.get_mut(AgentId(0)).unit_heading()
        );
    }

    #[test]
    fn pushed_rng_matches_built_rng() {
        let (_, mut built) = AgentStoreBuilder::new(2, 5).build().unwrap();
        let (_, mut grown) = AgentStoreBuilder::new(1, 5).build().unwrap();
        grown.push(AgentId(1));
        // `build` already spent one draw on the spawn heading.
        let _ = grown.get_mut(AgentId(1)).unit_heading();
        assert_eq!(
            built.get_mut(AgentId(1)).unit_heading(),
            grown.get_mut(AgentId(1)).unit_heading()
        );
    }
}
