//! The `Sim` struct and its tick loop.

use steer_agent::{AgentConfig, AgentError, AgentRngs, AgentStore, AgentTunables, initial_velocity};
use steer_behavior::{AgentSteering, ForceContribution, SteerContext};
use steer_core::{AgentId, SimClock, SimConfig, Tick, Vec3, WorldBounds, check_dt};
use steer_spatial::{AgentView, LinearScan, ObstacleField, WorldSnapshot};

use crate::{SimError, SimObserver, SimResult, TickSummary};

/// Where behaviors read other agents' state from during a tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum QueryMode {
    /// Every agent reads the state committed at tick start.  Results do not
    /// depend on agent order.
    #[default]
    Snapshot,
    /// Agents are processed one after another in id order and each sees
    /// the already-integrated state of the agents before it.
    Live,
}

/// One Euler step for a single agent.
///
/// Clamps `force` to `max_force`, accelerates by `force / mass`, clamps the
/// speed to `max_speed`, moves, and wraps at the world edge.  Returns the
/// force actually applied.
pub fn integrate(
    position: &mut Vec3,
    velocity: &mut Vec3,
    force:    Vec3,
    config:   &AgentConfig,
    bounds:   &WorldBounds,
    dt:       f32,
) -> Vec3 {
    let applied = force.limited(config.max_force);
    let acceleration = applied / config.mass;
    *velocity = (*velocity + acceleration * dt).limited(config.max_speed);
    *position = bounds.wrap(*position + *velocity * dt);
    applied
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each tick runs in two phases:
///
/// 1. **Intent** (optionally parallel with the `parallel` feature): every
///    live agent's steering is evaluated against a [`WorldSnapshot`] taken at
///    tick start, producing one force per agent.
/// 2. **Apply** (sequential, ascending `AgentId`): forces are clamped and
///    integrated, and positions wrap at the world edge.
///
/// With [`QueryMode::Live`] the phases are interleaved per agent instead.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (step size, total ticks, bounds, …).
    pub config: SimConfig,

    pub clock: SimClock,

    /// Agent state (SoA arrays).  Only the apply phase writes position and
    /// velocity.
    pub agents: AgentStore,

    /// Per-agent deterministic RNGs.
    pub rngs: AgentRngs,

    /// Steering setup per agent, indexed by `AgentId`.
    pub steering: Vec<AgentSteering>,

    pub obstacles: ObstacleField,

    pub query_mode: QueryMode,

    /// Force breakdown of the last tick, filled when
    /// `config.record_contributions` is set.
    pub(crate) contributions: Vec<ForceContribution>,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = self.config.end_tick();
        log::info!("running {} → {end} ({} live agents)", self.clock.current_tick, self.agents.live_count());
        while self.clock.current_tick < end {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        log::info!("finished at {}", self.clock);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Advance every live agent by `dt` seconds.
    ///
    /// Fails only on a non-finite or non-positive `dt`; misconfigured or
    /// target-less behaviors simply contribute no steering.  `dt` need not
    /// match `config.dt_secs`; the clock adds up the steps actually taken.
    pub fn tick(&mut self, dt: f32) -> SimResult<TickSummary> {
        let dt = check_dt(dt)?;
        let now = self.clock.current_tick;
        self.contributions.clear();

        let applied: Vec<(AgentId, f32)> = match self.query_mode {
            QueryMode::Snapshot => {
                let forces = self.compute_forces();
                forces
                    .into_iter()
                    .map(|(agent, force)| (agent, self.apply(agent, force, dt)))
                    .collect()
            }
            QueryMode::Live => self.live_pass(dt),
        };

        self.clock.advance_by(dt);
        let summary = self.summarize(now, &applied);
        log::debug!(
            "{now}: {} agents, mean speed {:.2}, max speed {:.2}, mean force {:.2}",
            summary.agents, summary.mean_speed, summary.max_speed, summary.mean_force,
        );
        Ok(summary)
    }

    /// Add an agent mid-run.  A zero `velocity` gets a random heading at
    /// half `max_speed`, as at construction.
    pub fn spawn_agent(
        &mut self,
        position: Vec3,
        velocity: Vec3,
        tunables: AgentTunables,
        steering: impl Into<AgentSteering>,
    ) -> SimResult<AgentId> {
        let id = AgentId(self.agents.count as u32);
        tunables.validate(id)?;
        let steering = steering.into();
        steering.validate().map_err(|source| SimError::Behavior { agent: id, source })?;

        let velocity = initial_velocity(velocity, &tunables, self.rngs.push(id));
        let pushed = self.agents.push(position, velocity, tunables);
        debug_assert_eq!(pushed, id);
        self.steering.push(steering);
        log::debug!("spawned {id} at {position}");
        Ok(id)
    }

    /// Take an agent out of the world.  Its id is never reused; behaviors
    /// still tracking it fall back to zero steering.
    pub fn remove_agent(&mut self, agent: AgentId) -> SimResult<()> {
        self.agents.remove(agent)?;
        self.steering[agent.index()] = AgentSteering::default();
        log::debug!("removed {agent}");
        Ok(())
    }

    /// Replace an agent's movement limits.  Takes effect next tick.
    pub fn set_tunables(&mut self, agent: AgentId, tunables: AgentTunables) -> SimResult<()> {
        if !self.agents.is_alive(agent) {
            return Err(AgentError::NotFound(agent).into());
        }
        tunables.validate(agent)?;
        self.agents.tunables[agent.index()] = tunables;
        Ok(())
    }

    /// Edit a live agent's steering in place, for retargeting, reweighting
    /// or editing paths.  Takes effect next tick.
    ///
    /// The result is re-validated afterwards.  Behaviors the edit left
    /// invalid are disabled and the first failure is returned; the rest of
    /// the setup keeps running.
    pub fn edit_steering<R>(
        &mut self,
        agent: AgentId,
        edit:  impl FnOnce(&mut AgentSteering) -> R,
    ) -> SimResult<R> {
        if !self.agents.is_alive(agent) {
            return Err(AgentError::NotFound(agent).into());
        }
        let i = agent.index();
        let out = edit(&mut self.steering[i]);
        if let Err(source) = self.steering[i].disable_invalid() {
            log::warn!("{agent}: steering edit rejected ({source}); invalid behaviors disabled");
            return Err(SimError::Behavior { agent, source });
        }
        Ok(out)
    }

    /// Per-behavior forces of the last tick.  Empty unless
    /// `config.record_contributions` is set.
    pub fn contributions(&self) -> &[ForceContribution] {
        &self.contributions
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn view(&self, agent: AgentId) -> AgentView {
        let i = agent.index();
        AgentView {
            id:       agent,
            position: self.agents.position[i],
            velocity: self.agents.velocity[i],
            radius:   self.agents.tunables[i].radius,
        }
    }

    /// Intent phase: one total steering force per live agent, ascending id.
    fn compute_forces(&mut self) -> Vec<(AgentId, Vec3)> {
        let views: Vec<AgentView> = self.agents.live_ids().map(|id| self.view(id)).collect();
        let world = WorldSnapshot::new(views, &self.obstacles).with_walls(self.config.bounds);

        // Explicit field borrows so the borrow checker sees disjoint access.
        let agents = &self.agents;
        let record = self.config.record_contributions;

        let evaluate = |(i, steering): (usize, &mut AgentSteering)| {
            let id = AgentId(i as u32);
            if !agents.is_alive(id) {
                return None;
            }
            let ctx = SteerContext::new(
                id,
                agents.position[i],
                agents.velocity[i],
                agents.config(id),
                &world,
            );
            let mut trace = Vec::new();
            let force = steering.steer(&ctx, record.then_some(&mut trace));
            Some((id, force, trace))
        };

        #[cfg(not(feature = "parallel"))]
        let results: Vec<(AgentId, Vec3, Vec<ForceContribution>)> =
            self.steering.iter_mut().enumerate().filter_map(evaluate).collect();

        #[cfg(feature = "parallel")]
        let results: Vec<(AgentId, Vec3, Vec<ForceContribution>)> = {
            use rayon::prelude::*;

            let steering = &mut self.steering;
            let par = || steering.par_iter_mut().enumerate().filter_map(evaluate).collect::<Vec<_>>();
            match &self.pool {
                Some(pool) => pool.install(par),
                None => par(),
            }
        };

        results
            .into_iter()
            .map(|(id, force, trace)| {
                self.contributions.extend(trace);
                (id, force)
            })
            .collect()
    }

    /// Apply phase for one agent.  Returns the applied force magnitude.
    fn apply(&mut self, agent: AgentId, force: Vec3, dt: f32) -> f32 {
        let i = agent.index();
        let config = self.agents.config(agent);
        integrate(
            &mut self.agents.position[i],
            &mut self.agents.velocity[i],
            force,
            &config,
            &self.config.bounds,
            dt,
        )
        .length()
    }

    /// Evaluate and integrate agents one at a time, each reading the live
    /// state left by the ones before it.
    fn live_pass(&mut self, dt: f32) -> Vec<(AgentId, f32)> {
        let ids: Vec<AgentId> = self.agents.live_ids().collect();
        let mut views: Vec<AgentView> = ids.iter().map(|&id| self.view(id)).collect();
        let record = self.config.record_contributions;
        let mut applied = Vec::with_capacity(ids.len());

        for (slot, &id) in ids.iter().enumerate() {
            let i = id.index();
            let force = {
                let world = LinearScan::new(&views, &self.obstacles).with_walls(self.config.bounds);
                let ctx = SteerContext::new(
                    id,
                    self.agents.position[i],
                    self.agents.velocity[i],
                    self.agents.config(id),
                    &world,
                );
                let mut trace = Vec::new();
                let force = self.steering[i].steer(&ctx, record.then_some(&mut trace));
                self.contributions.extend(trace);
                force
            };
            applied.push((id, self.apply(id, force, dt)));
            views[slot] = self.view(id);
        }
        applied
    }

    fn summarize(&self, tick: Tick, applied: &[(AgentId, f32)]) -> TickSummary {
        let n = applied.len();
        let elapsed_secs = self.clock.elapsed_secs();
        if n == 0 {
            return TickSummary { tick, elapsed_secs, ..Default::default() };
        }
        let mut speed_sum = 0.0;
        let mut max_speed: f32 = 0.0;
        let mut force_sum = 0.0;
        for &(agent, force) in applied {
            let speed = self.agents.speed(agent);
            speed_sum += speed;
            max_speed = max_speed.max(speed);
            force_sum += force;
        }
        TickSummary {
            tick,
            elapsed_secs,
            agents:     n,
            mean_speed: speed_sum / n as f32,
            max_speed,
            mean_force: force_sum / n as f32,
        }
    }

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let summary = self.tick(self.config.dt_secs)?;
        if self.config.record_contributions {
            observer.on_forces(now, &self.contributions);
        }
        observer.on_tick_end(&summary);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.agents);
        }
        Ok(())
    }
}
