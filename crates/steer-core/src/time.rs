//! Simulation time model.
//!
//! Time advances one `Tick` per simulation step.  The integer tick is the
//! canonical counter.  Elapsed seconds are summed from the `dt` of each step
//! actually taken, since the host may step with a `dt` other than the
//! configured `dt_secs`.

use std::fmt;

use crate::{SteerError, SteerResult, WorldBounds};

/// `Ok(dt)` when `dt` is finite and `> 0`.
pub fn check_dt(dt: f32) -> SteerResult<f32> {
    if dt.is_finite() && dt > 0.0 {
        Ok(dt)
    } else {
        Err(SteerError::InvalidTimeStep(dt))
    }
}

// ── Tick ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Default step in seconds, used by [`advance`](Self::advance).
    pub dt_secs:      f32,
    pub current_tick: Tick,
    elapsed_secs:     f64,
}

impl SimClock {
    pub fn new(dt_secs: f32) -> Self {
        Self { dt_secs, current_tick: Tick::ZERO, elapsed_secs: 0.0 }
    }

    /// One tick of the configured `dt_secs`.
    #[inline]
    pub fn advance(&mut self) {
        self.advance_by(self.dt_secs);
    }

    /// One tick of `dt` seconds.
    #[inline]
    pub fn advance_by(&mut self, dt: f32) {
        self.current_tick = Tick(self.current_tick.0 + 1);
        self.elapsed_secs += dt as f64;
    }

    /// Simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}s)", self.current_tick, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Usually built in code by the host; the `serde` feature lets a scenario
/// binary load it from JSON instead.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Fixed step in seconds.  Default: 1/60.
    pub dt_secs: f32,

    /// Ticks executed by `Sim::run`.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Wrap-around world extents.
    pub bounds: WorldBounds,

    /// Emit output every N ticks.  0 disables periodic snapshots.
    pub output_interval_ticks: u64,

    /// Rayon worker count for the `parallel` feature.  `None` uses all cores.
    pub num_threads: Option<usize>,

    /// Keep per-behavior force contributions as read-only tick output.
    pub record_contributions: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt_secs:               1.0 / 60.0,
            total_ticks:           600,
            seed:                  0,
            bounds:                WorldBounds::default(),
            output_interval_ticks: 1,
            num_threads:           None,
            record_contributions:  false,
        }
    }
}

impl SimConfig {
    /// The tick at which `Sim::run` stops (exclusive).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.dt_secs)
    }

    /// Reject a step or world the integrator cannot run with.
    pub fn validate(&self) -> SteerResult<()> {
        check_dt(self.dt_secs)?;
        self.bounds.validate()
    }
}
