//! Integration tests for steer-sim.

use steer_agent::{AgentError, AgentRngs, AgentStore, AgentStoreBuilder, AgentTunables};
use steer_behavior::{
    AgentSteering, Arrive, Behavior, BehaviorError, BehaviorKind, ContextSteering, Evade, Flock,
    ObstacleAvoidance, Pursue, Seek, Separation, WallFollowing,
};
use steer_core::{AgentId, SimConfig, SteerError, Tick, Vec3, WorldBounds};
use steer_spatial::Obstacle;

use crate::{NoopObserver, QueryMode, SimBuilder, SimError, SimObserver, TickSummary};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        dt_secs:               0.1,
        total_ticks,
        seed:                  42,
        bounds:                WorldBounds::default(),
        output_interval_ticks: 1,
        num_threads:           Some(1),
        record_contributions:  false,
    }
}

fn tunables() -> AgentTunables {
    AgentTunables::new(150.0, 100.0, 1.0, 20.0)
}

/// Agents at `positions` moving with `velocities`, all with [`tunables`].
fn store(positions: Vec<Vec3>, velocities: Vec<Vec3>) -> (AgentStore, AgentRngs) {
    let n = positions.len();
    AgentStoreBuilder::new(n, 42)
        .positions(positions)
        .velocities(velocities)
        .uniform_tunables(tunables())
        .build()
        .unwrap()
}

fn blend(behaviors: Vec<Behavior>) -> AgentSteering {
    AgentSteering::Blended(behaviors)
}

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-3
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let (store, rngs) = AgentStoreBuilder::new(3, 42).build().unwrap();
        let sim = SimBuilder::new(test_config(10), store, rngs).build().unwrap();
        assert_eq!(sim.agents.count, 3);
        assert_eq!(sim.steering.len(), 3);
        assert_eq!(sim.query_mode, QueryMode::Snapshot);
    }

    #[test]
    fn steering_count_mismatch_errors() {
        let (store, rngs) = AgentStoreBuilder::new(3, 42).build().unwrap();
        let result = SimBuilder::new(test_config(10), store, rngs)
            .steering(Vec::new())
            .build();
        assert!(matches!(result, Err(SimError::AgentCountMismatch { expected: 3, got: 0, .. })));
    }

    #[test]
    fn invalid_time_step_errors() {
        let (store, rngs) = AgentStoreBuilder::new(1, 42).build().unwrap();
        let config = SimConfig { dt_secs: 0.0, ..test_config(10) };
        assert!(matches!(
            SimBuilder::new(config, store, rngs).build(),
            Err(SimError::Core(SteerError::InvalidTimeStep(_)))
        ));
    }

    #[test]
    fn invalid_behavior_names_agent() {
        let (store, rngs) = AgentStoreBuilder::new(2, 42).build().unwrap();
        let result = SimBuilder::new(test_config(10), store, rngs)
            .steering(vec![
                AgentSteering::default(),
                blend(vec![Behavior::new(Separation::new(-5.0))]),
            ])
            .build();
        match result {
            Err(SimError::Behavior { agent, .. }) => assert_eq!(agent, AgentId(1)),
            other => panic!("expected behavior error, got {:?}", other.err()),
        }
    }

    #[test]
    fn invalid_obstacle_errors() {
        let (store, rngs) = AgentStoreBuilder::new(1, 42).build().unwrap();
        let result = SimBuilder::new(test_config(10), store, rngs)
            .obstacles(vec![Obstacle::with_radius(Vec3::ZERO, -1.0)])
            .build();
        assert!(matches!(result, Err(SimError::Spatial(_))));
    }

    #[test]
    fn degenerate_bounds_error() {
        let (store, rngs) = AgentStoreBuilder::new(1, 42).build().unwrap();
        let config = SimConfig { bounds: WorldBounds::new(0.0, 100.0), ..test_config(10) };
        match SimBuilder::new(config, store, rngs).build() {
            Err(SimError::Core(SteerError::InvalidBounds { width, height })) => {
                assert_eq!((width, height), (0.0, 200.0));
            }
            other => panic!("expected bounds error, got {:?}", other.err()),
        }
    }
}

// ── Basic run ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn runs_to_end_tick() {
        let (store, rngs) = AgentStoreBuilder::new(5, 42).build().unwrap();
        let mut sim = SimBuilder::new(test_config(10), store, rngs).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(10));
    }

    #[test]
    fn run_ticks_advances_clock() {
        let (store, rngs) = AgentStoreBuilder::new(2, 42).build().unwrap();
        let mut sim = SimBuilder::new(test_config(100), store, rngs).build().unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(5));
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(8));
    }

    /// Observer that counts every hook.
    #[derive(Default)]
    struct Counter {
        starts:    usize,
        ends:      usize,
        snapshots: usize,
        forces:    usize,
        finished:  Option<Tick>,
    }
    impl SimObserver for Counter {
        fn on_tick_start(&mut self, _t: Tick) { self.starts += 1; }
        fn on_tick_end(&mut self, _s: &TickSummary) { self.ends += 1; }
        fn on_snapshot(&mut self, _t: Tick, _a: &AgentStore) { self.snapshots += 1; }
        fn on_forces(&mut self, _t: Tick, _c: &[steer_behavior::ForceContribution]) { self.forces += 1; }
        fn on_sim_end(&mut self, t: Tick) { self.finished = Some(t); }
    }

    #[test]
    fn observer_called_correct_number_of_times() {
        let (store, rngs) = AgentStoreBuilder::new(1, 42).build().unwrap();
        let config = SimConfig { output_interval_ticks: 3, ..test_config(7) };
        let mut sim = SimBuilder::new(config, store, rngs).build().unwrap();
        let mut obs = Counter::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.starts, 7);
        assert_eq!(obs.ends, 7);
        // Ticks 0, 3, 6.
        assert_eq!(obs.snapshots, 3);
        assert_eq!(obs.forces, 0);
        assert_eq!(obs.finished, Some(Tick(7)));
    }

    #[test]
    fn forces_reported_when_recording() {
        let (store, rngs) = store(vec![Vec3::ZERO], vec![Vec3::xy(10.0, 0.0)]);
        let config = SimConfig { record_contributions: true, ..test_config(4) };
        let mut sim = SimBuilder::new(config, store, rngs)
            .steering(vec![blend(vec![Behavior::new(Seek::new(Vec3::xy(100.0, 0.0)))])])
            .build()
            .unwrap();
        let mut obs = Counter::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.forces, 4);
        assert_eq!(sim.contributions().len(), 1);
        assert_eq!(sim.contributions()[0].behavior, "seek");
    }

    #[test]
    fn zero_output_interval_disables_snapshots() {
        let (store, rngs) = AgentStoreBuilder::new(1, 42).build().unwrap();
        let config = SimConfig { output_interval_ticks: 0, ..test_config(5) };
        let mut sim = SimBuilder::new(config, store, rngs).build().unwrap();
        let mut obs = Counter::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.snapshots, 0);
    }

    #[test]
    fn same_seed_same_trajectory() {
        let run = || {
            let (store, rngs) = AgentStoreBuilder::new(4, 7)
                .positions(vec![Vec3::ZERO, Vec3::xy(30.0, 0.0), Vec3::xy(0.0, 30.0), Vec3::xy(30.0, 30.0)])
                .build()
                .unwrap();
            let steering = (0..4).map(|_| blend(vec![Behavior::new(Flock::default())])).collect();
            let mut sim = SimBuilder::new(test_config(20), store, rngs).steering(steering).build().unwrap();
            sim.run(&mut NoopObserver).unwrap();
            sim.agents.position.clone()
        };
        assert_eq!(run(), run());
    }
}

// ── Integration step ──────────────────────────────────────────────────────────

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn seek_single_euler_step() {
        let (store, rngs) = store(vec![Vec3::ZERO], vec![Vec3::xy(10.0, 0.0)]);
        let mut sim = SimBuilder::new(test_config(10), store, rngs)
            .steering(vec![blend(vec![Behavior::new(Seek::new(Vec3::xy(100.0, 0.0)))])])
            .build()
            .unwrap();
        let summary = sim.tick(0.1).unwrap();
        // force (140, 0) clamped to 100, a = 100, v = 10 + 10, p = 20 * 0.1
        assert!(approx(sim.agents.velocity[0], Vec3::xy(20.0, 0.0)));
        assert!(approx(sim.agents.position[0], Vec3::xy(2.0, 0.0)));
        assert_eq!(summary.tick, Tick(0));
        assert_eq!(summary.agents, 1);
        assert!((summary.mean_force - 100.0).abs() < 1e-3);
        assert_eq!(sim.clock.current_tick, Tick(1));
    }

    #[test]
    fn mass_divides_acceleration() {
        let (mut store, rngs) = store(vec![Vec3::ZERO], vec![Vec3::xy(10.0, 0.0)]);
        store.tunables[0].mass = 2.0;
        let mut sim = SimBuilder::new(test_config(10), store, rngs)
            .steering(vec![blend(vec![Behavior::new(Seek::new(Vec3::xy(100.0, 0.0)))])])
            .build()
            .unwrap();
        sim.tick(0.1).unwrap();
        assert!(approx(sim.agents.velocity[0], Vec3::xy(15.0, 0.0)));
    }

    #[test]
    fn position_wraps_to_opposite_edge() {
        let (store, rngs) = store(vec![Vec3::xy(399.0, 0.0)], vec![Vec3::xy(100.0, 0.0)]);
        let mut sim = SimBuilder::new(test_config(10), store, rngs).build().unwrap();
        sim.tick(0.1).unwrap();
        assert_eq!(sim.agents.position[0].x, -400.0);
    }

    #[test]
    fn bad_dt_is_rejected_without_advancing() {
        let (store, rngs) = store(vec![Vec3::ZERO], vec![Vec3::xy(10.0, 0.0)]);
        let mut sim = SimBuilder::new(test_config(10), store, rngs).build().unwrap();
        assert!(matches!(sim.tick(f32::NAN), Err(SimError::Core(SteerError::InvalidTimeStep(_)))));
        assert!(matches!(sim.tick(-0.1), Err(SimError::Core(SteerError::InvalidTimeStep(_)))));
        assert_eq!(sim.clock.current_tick, Tick(0));
        assert_eq!(sim.agents.position[0], Vec3::ZERO);
    }

    #[test]
    fn host_dt_drives_motion_and_clock() {
        // Configured dt is 0.1; the host steps with 1.0.
        let (store, rngs) = store(vec![Vec3::ZERO], vec![Vec3::xy(10.0, 0.0)]);
        let mut sim = SimBuilder::new(test_config(10), store, rngs).build().unwrap();
        let first = sim.tick(1.0).unwrap();
        let second = sim.tick(1.0).unwrap();
        assert!(approx(sim.agents.position[0], Vec3::xy(20.0, 0.0)));
        assert_eq!(sim.clock.current_tick, Tick(2));
        assert!((sim.clock.elapsed_secs() - 2.0).abs() < 1e-9);
        assert_eq!((first.tick, first.elapsed_secs), (Tick(0), 1.0));
        assert_eq!((second.tick, second.elapsed_secs), (Tick(1), 2.0));
    }

    #[test]
    fn context_steering_integrates_like_blending() {
        let (store, rngs) = store(vec![Vec3::ZERO], vec![Vec3::xy(50.0, 0.0)]);
        let mut sim = SimBuilder::new(test_config(10), store, rngs)
            .steering(vec![AgentSteering::Context(ContextSteering::default())])
            .build()
            .unwrap();
        sim.tick(0.1).unwrap();
        // best sector is +X: force = (150, 0) - (50, 0) = (100, 0)
        assert!(approx(sim.agents.velocity[0], Vec3::xy(60.0, 0.0)));
    }

    /// Checks the speed cap on every committed state.
    struct SpeedCap;
    impl SimObserver for SpeedCap {
        fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore) {
            for id in agents.live_ids() {
                let cap = agents.tunables[id.index()].max_speed;
                assert!(agents.speed(id) <= cap + 1e-3, "{id} over speed cap at {tick}");
            }
        }
    }

    #[test]
    fn speed_never_exceeds_max_speed() {
        let n = 8;
        let positions = (0..n).map(|i| Vec3::xy(-350.0 + 25.0 * i as f32, (i % 3) as f32 * 15.0)).collect();
        let (store, rngs) = AgentStoreBuilder::new(n, 3)
            .positions(positions)
            .uniform_tunables(AgentTunables::new(120.0, 400.0, 0.5, 15.0))
            .build()
            .unwrap();
        let steering = (0..n)
            .map(|i| {
                blend(vec![
                    Behavior::new(Flock::default()),
                    Behavior::new(ObstacleAvoidance::default()),
                    Behavior::new(WallFollowing::default()),
                    Behavior::new(Pursue::new(AgentId(((i + 1) % n) as u32))),
                    Behavior::new(Evade::new(AgentId(((i + 2) % n) as u32))),
                ])
            })
            .collect();
        let mut sim = SimBuilder::new(test_config(120), store, rngs)
            .steering(steering)
            .obstacles(vec![Obstacle::new(Vec3::xy(-250.0, 20.0)), Obstacle::new(Vec3::xy(-150.0, -10.0))])
            .build()
            .unwrap();
        sim.run(&mut SpeedCap).unwrap();
    }
}

// ── Snapshot vs live queries ──────────────────────────────────────────────────

#[cfg(test)]
mod query_mode_tests {
    use super::*;

    /// A at (0,0) and B at (20,0) arriving at each other, with A stored at
    /// index `a`.  Returns A's position after one tick.
    fn a_after_one_tick(mode: QueryMode, a_first: bool) -> Vec3 {
        let a = (Vec3::ZERO, Vec3::xy(10.0, 0.0));
        let b = (Vec3::xy(20.0, 0.0), Vec3::xy(-10.0, 0.0));
        let (first, second) = if a_first { (a, b) } else { (b, a) };
        let (store, rngs) = store(vec![first.0, second.0], vec![first.1, second.1]);
        let arrive = |other: u32| {
            blend(vec![Behavior::new(Arrive::new(AgentId(other)).with_radii(1.0, 100.0))])
        };
        let mut sim = SimBuilder::new(test_config(10), store, rngs)
            .steering(vec![arrive(1), arrive(0)])
            .query_mode(mode)
            .build()
            .unwrap();
        sim.tick(0.1).unwrap();
        sim.agents.position[if a_first { 0 } else { 1 }]
    }

    #[test]
    fn snapshot_results_ignore_agent_order() {
        assert_eq!(
            a_after_one_tick(QueryMode::Snapshot, true),
            a_after_one_tick(QueryMode::Snapshot, false),
        );
    }

    #[test]
    fn live_results_depend_on_agent_order() {
        assert_ne!(
            a_after_one_tick(QueryMode::Live, true),
            a_after_one_tick(QueryMode::Live, false),
        );
    }

    #[test]
    fn live_first_agent_matches_snapshot() {
        assert_eq!(
            a_after_one_tick(QueryMode::Live, true),
            a_after_one_tick(QueryMode::Snapshot, true),
        );
    }
}

// ── Spawning, removal, and editing ────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn spawned_agent_gets_heading_and_rng() {
        let (store, rngs) = store(vec![Vec3::ZERO], vec![Vec3::xy(10.0, 0.0)]);
        let mut sim = SimBuilder::new(test_config(10), store, rngs).build().unwrap();
        let id = sim
            .spawn_agent(Vec3::xy(50.0, 50.0), Vec3::ZERO, tunables(), AgentSteering::default())
            .unwrap();
        assert_eq!(id, AgentId(1));
        assert_eq!(sim.rngs.len(), 2);
        assert_eq!(sim.steering.len(), 2);
        assert!((sim.agents.speed(id) - 75.0).abs() < 1e-3);
        sim.tick(0.1).unwrap();
        assert_ne!(sim.agents.position[1], Vec3::xy(50.0, 50.0));
    }

    #[test]
    fn spawn_rejects_invalid_input() {
        let (store, rngs) = store(vec![Vec3::ZERO], vec![Vec3::xy(10.0, 0.0)]);
        let mut sim = SimBuilder::new(test_config(10), store, rngs).build().unwrap();
        let bad_mass = AgentTunables { mass: 0.0, ..tunables() };
        assert!(matches!(
            sim.spawn_agent(Vec3::ZERO, Vec3::ZERO, bad_mass, AgentSteering::default()),
            Err(SimError::Agent(_))
        ));
        let bad_behavior = blend(vec![Behavior::new(Separation::new(f32::NAN))]);
        assert!(matches!(
            sim.spawn_agent(Vec3::ZERO, Vec3::ZERO, tunables(), bad_behavior),
            Err(SimError::Behavior { .. })
        ));
        assert_eq!(sim.agents.count, 1);
    }

    #[test]
    fn removed_agent_is_frozen_and_pursuit_degrades() {
        let (store, rngs) = store(
            vec![Vec3::ZERO, Vec3::xy(100.0, 0.0)],
            vec![Vec3::xy(10.0, 0.0), Vec3::xy(0.0, 10.0)],
        );
        let mut sim = SimBuilder::new(test_config(10), store, rngs)
            .steering(vec![blend(vec![Behavior::new(Pursue::new(AgentId(1)))]), AgentSteering::default()])
            .build()
            .unwrap();
        sim.remove_agent(AgentId(1)).unwrap();
        let frozen = sim.agents.position[1];
        let summary = sim.tick(0.1).unwrap();
        assert_eq!(summary.agents, 1);
        assert_eq!(sim.agents.position[1], frozen);
        // Pursuer coasts on its velocity.
        assert!(approx(sim.agents.velocity[0], Vec3::xy(10.0, 0.0)));
        assert!(matches!(sim.remove_agent(AgentId(1)), Err(SimError::Agent(_))));
        assert!(matches!(
            sim.edit_steering(AgentId(1), |_| ()),
            Err(SimError::Agent(AgentError::NotFound(AgentId(1))))
        ));
    }

    #[test]
    fn retargeting_through_edit_steering() {
        let (store, rngs) = store(vec![Vec3::ZERO], vec![Vec3::xy(0.0, 1.0)]);
        let mut sim = SimBuilder::new(test_config(10), store, rngs)
            .steering(vec![blend(vec![Behavior::new(Seek::new(Vec3::xy(100.0, 0.0)))])])
            .build()
            .unwrap();
        let replaced = sim
            .edit_steering(AgentId(0), |s| match s.behaviors_mut() {
                Some(behaviors) => {
                    behaviors[0] = Behavior::new(Seek::new(Vec3::xy(-100.0, 0.0)));
                    true
                }
                None => false,
            })
            .unwrap();
        assert!(replaced);
        sim.tick(0.1).unwrap();
        assert!(sim.agents.velocity[0].x < 0.0);
    }

    #[test]
    fn invalid_steering_edit_is_disabled_not_integrated() {
        let (store, rngs) = store(
            vec![Vec3::xy(10.0, 10.0), Vec3::xy(10.0, 10.0)],
            vec![Vec3::xy(1.0, 0.0), Vec3::xy(-1.0, 0.0)],
        );
        let mut sim = SimBuilder::new(test_config(10), store, rngs)
            .steering(vec![
                blend(vec![
                    Behavior::new(Seek::new(Vec3::xy(100.0, 10.0))),
                    Behavior::new(Evade::new(AgentId(1))),
                ]),
                AgentSteering::default(),
            ])
            .build()
            .unwrap();
        let err = sim
            .edit_steering(AgentId(0), |s| {
                for b in s.behaviors_mut().into_iter().flatten() {
                    if let BehaviorKind::Evade(e) = &mut b.kind {
                        e.panic_radius = 0.0;
                    }
                }
            })
            .unwrap_err();
        match err {
            SimError::Behavior { agent, source: BehaviorError::InvalidParameter { field, .. } } => {
                assert_eq!((agent, field), (AgentId(0), "panic_radius"));
            }
            other => panic!("expected behavior error, got {other:?}"),
        }
        let enabled: Vec<bool> = sim.steering[0].behaviors().iter().map(|b| b.enabled).collect();
        assert_eq!(enabled, vec![true, false]);

        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert!(sim.agents.position[0].is_finite());
        assert!(sim.agents.velocity[0].is_finite());
        // Seek still runs.
        assert!(sim.agents.velocity[0].x > 1.0);
    }

    #[test]
    fn tunables_edit_applies_next_tick() {
        let (store, rngs) = store(vec![Vec3::ZERO], vec![Vec3::xy(10.0, 0.0)]);
        let mut sim = SimBuilder::new(test_config(10), store, rngs)
            .steering(vec![blend(vec![Behavior::new(Seek::new(Vec3::xy(100.0, 0.0)))])])
            .build()
            .unwrap();
        sim.set_tunables(AgentId(0), AgentTunables::new(150.0, 10.0, 1.0, 20.0)).unwrap();
        sim.tick(0.1).unwrap();
        assert!(approx(sim.agents.velocity[0], Vec3::xy(11.0, 0.0)));
        assert!(matches!(
            sim.set_tunables(AgentId(0), AgentTunables { max_speed: -1.0, ..tunables() }),
            Err(SimError::Agent(AgentError::InvalidTunables { agent: AgentId(0), field: "max_speed", .. }))
        ));
        assert!(sim.set_tunables(AgentId(5), tunables()).is_err());
    }
}
