//! swarm: steering behaviors demo.
//!
//! A beacon laps a circle while eight agents seek it, flee it, or just
//! flock around it, two context-map wanderers roam, and four obstacles sit
//! in a ring around the origin.  Halfway through a latecomer joins the
//! seekers.
//!
//! ```text
//! swarm [CONFIG.json] [OUTPUT_DIR]
//! ```
//!
//! `CONFIG.json` holds a (partial) `SimConfig`; missing fields keep their
//! defaults.  Output defaults to `output/swarm`.

mod scenario;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};

use steer_agent::{AgentStore, AgentStoreBuilder};
use steer_behavior::ForceContribution;
use steer_core::{SimConfig, SimRng, Tick, Vec3};
use steer_output::{CsvWriter, OutputWriter, SimOutputObserver};
use steer_sim::{SimBuilder, SimObserver, TickSummary};

use scenario::{BEACON, SWARM_SIZE};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:          u64 = 42;
const TOTAL_TICKS:   u64 = 1_200; // 20 s at 60 Hz
const PROGRESS_SECS: f64 = 5.0;

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:          SimOutputObserver<W>,
    snapshot_rows:  usize,
    summary_rows:   usize,
    force_rows:     usize,
    progress_every: u64,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>, config: &SimConfig) -> Self {
        let progress_every = ((PROGRESS_SECS / config.dt_secs as f64).round() as u64).max(1);
        Self { inner, snapshot_rows: 0, summary_rows: 0, force_rows: 0, progress_every }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.summary_rows += 1;
        if summary.tick.0.is_multiple_of(self.progress_every) {
            log::info!(
                "{}: {} agents, mean speed {:.1}, max speed {:.1}",
                summary.tick, summary.agents, summary.mean_speed, summary.max_speed,
            );
        }
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore) {
        self.snapshot_rows += agents.live_count();
        self.inner.on_snapshot(tick, agents);
    }

    fn on_forces(&mut self, tick: Tick, contributions: &[ForceContribution]) {
        self.force_rows += contributions.len();
        self.inner.on_forces(tick, contributions);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run() {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig {
            total_ticks:           TOTAL_TICKS,
            seed:                  SEED,
            output_interval_ticks: 10,
            record_contributions:  true,
            ..SimConfig::default()
        });
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: SimConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config.validate().with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let out_dir = args.next().map_or_else(|| PathBuf::from("output/swarm"), PathBuf::from);

    // 1. Config and scene.
    let config = load_config(config_path.as_deref())?;
    let scene = scenario::build(config.seed);
    log::info!(
        "{} agents, {} obstacles, {} ticks of {:.4}s, seed {}",
        scene.agent_count(),
        scene.obstacles.len(),
        config.total_ticks,
        config.dt_secs,
        config.seed,
    );

    // 2. Agents.  Zero velocities get a random heading at half max speed.
    let (store, rngs) = AgentStoreBuilder::new(scene.agent_count(), config.seed)
        .positions(scene.positions)
        .tunables(scene.tunables)
        .build()
        .context("failed to build agent store")?;

    // 3. Sim.
    let mut sim = SimBuilder::new(config.clone(), store, rngs)
        .steering(scene.steering)
        .obstacles(scene.obstacles)
        .build()
        .context("failed to build sim")?;

    // 4. Output.
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let writer = CsvWriter::new(&out_dir)?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer), &config);

    // 5. Run, with a latecomer joining the seekers halfway through.
    let t0 = Instant::now();
    sim.run_ticks(config.total_ticks / 2, &mut obs)?;
    let mut rng = SimRng::new(config.seed).child(1);
    let latecomer = sim.spawn_agent(
        Vec3::xy(-350.0, 250.0),
        Vec3::ZERO,
        scenario::random_tunables(&mut rng),
        scenario::swarm_steering(0),
    )?;
    log::info!("{latecomer} joined at {}", sim.clock.current_tick);
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        log::error!("output error: {e}");
    }

    // 6. Summary.
    log::info!("simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  agent_snapshots.csv     : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv      : {} rows", obs.summary_rows);
    println!("  force_contributions.csv : {} rows", obs.force_rows);
    println!();

    // 7. Final agent table.
    let beacon = sim.agents.position[BEACON.index()];
    println!("{:<12} {:<10} {:>9} {:>9} {:>8} {:>10}", "Agent", "Role", "x", "y", "speed", "to beacon");
    println!("{}", "-".repeat(63));
    for id in sim.agents.live_ids() {
        let i = id.index();
        let role = match i {
            0 => "beacon",
            i if i <= SWARM_SIZE => ["seeker", "fleer", "flocker", "mixed"][(i - 1) % 4],
            i if i <= SWARM_SIZE + scenario::WANDERERS => "wanderer",
            _ => "latecomer",
        };
        let p = sim.agents.position[i];
        println!(
            "{:<12} {:<10} {:>9.1} {:>9.1} {:>8.1} {:>10.1}",
            id.to_string(),
            role,
            p.x,
            p.y,
            sim.agents.speed(id),
            p.distance(beacon),
        );
    }

    Ok(())
}
