//! The demo swarm: a beacon circling the origin, eight followers with four
//! behavior mixes, a pair of context-map wanderers, and a ring of obstacles.

use std::f32::consts::TAU;

use steer_agent::AgentTunables;
use steer_behavior::{
    AgentSteering, Behavior, ContextSteering, Flee, Flock, ObstacleAvoidance, PathFollowing, Seek,
};
use steer_core::{AgentId, SimRng, Vec3};
use steer_spatial::Obstacle;

pub const SWARM_SIZE:     usize = 8;
pub const WANDERERS:      usize = 2;
pub const OBSTACLE_COUNT: usize = 4;

/// Every follower tracks this agent in place of a pointer target.
pub const BEACON: AgentId = AgentId(0);

pub struct Scenario {
    pub positions: Vec<Vec3>,
    pub tunables:  Vec<AgentTunables>,
    pub steering:  Vec<AgentSteering>,
    pub obstacles: Vec<Obstacle>,
}

impl Scenario {
    pub fn agent_count(&self) -> usize {
        self.positions.len()
    }
}

/// Max speed 120–200, max force 80–120, radius 12–20.
pub fn random_tunables(rng: &mut SimRng) -> AgentTunables {
    AgentTunables::new(
        rng.gen_range(120.0..200.0),
        rng.gen_range(80.0..120.0),
        1.0,
        rng.gen_range(12.0..20.0),
    )
}

/// One of four behavior mixes, chosen by `index % 4`.
pub fn swarm_steering(index: usize) -> AgentSteering {
    let behaviors = match index % 4 {
        // Seeker
        0 => vec![
            Behavior::new(Seek::new(BEACON)).with_weight(0.8),
            Behavior::new(Flock::default().with_weights(2.0, 1.0, 0.8)).with_weight(1.2),
            Behavior::new(ObstacleAvoidance::default()).with_weight(3.0),
        ],
        // Fleer
        1 => vec![
            Behavior::new(Flee::new(BEACON).with_radius(150.0)).with_weight(1.5),
            Behavior::new(Flock::default().with_weights(1.5, 1.2, 1.0)),
            Behavior::new(ObstacleAvoidance::default()).with_weight(2.5),
        ],
        // Pure flock
        2 => vec![
            Behavior::new(Flock::default().with_weights(2.5, 1.5, 1.2)).with_weight(2.0),
            Behavior::new(ObstacleAvoidance::default()).with_weight(3.0),
        ],
        // Mixed
        _ => vec![
            Behavior::new(Seek::new(BEACON)).with_weight(0.5),
            Behavior::new(Flee::new(BEACON).with_radius(80.0)).with_weight(1.8),
            Behavior::new(Flock::default()),
            Behavior::new(ObstacleAvoidance::default()).with_weight(2.8),
        ],
    };
    AgentSteering::Blended(behaviors)
}

/// Build the full scene from `seed`.
pub fn build(seed: u64) -> Scenario {
    let mut rng = SimRng::new(seed);
    let mut positions = Vec::new();
    let mut tunables = Vec::new();
    let mut steering = Vec::new();

    // Beacon: a slow lap of a circle, steering clear of obstacles.
    positions.push(Vec3::xy(250.0, 0.0));
    tunables.push(AgentTunables::new(90.0, 120.0, 1.0, 10.0));
    steering.push(AgentSteering::Blended(vec![
        Behavior::new(PathFollowing::circular(Vec3::ZERO, 250.0, 16)),
        Behavior::new(ObstacleAvoidance::default()).with_weight(2.0),
    ]));

    for i in 0..SWARM_SIZE {
        positions.push(Vec3::xy(rng.gen_range(-250.0..250.0), rng.gen_range(-150.0..150.0)));
        tunables.push(random_tunables(&mut rng));
        steering.push(swarm_steering(i));
    }

    for _ in 0..WANDERERS {
        positions.push(Vec3::xy(rng.gen_range(-250.0..250.0), rng.gen_range(-150.0..150.0)));
        tunables.push(random_tunables(&mut rng));
        steering.push(ContextSteering::default().into());
    }

    let obstacles = (0..OBSTACLE_COUNT)
        .map(|i| {
            let angle = i as f32 / OBSTACLE_COUNT as f32 * TAU;
            let distance = rng.gen_range(120.0..200.0);
            Obstacle::new(Vec3::from_angle(angle) * distance)
        })
        .collect();

    Scenario { positions, tunables, steering, obstacles }
}
