//! Simulation time model and run configuration.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  The scheduler advances
//! exactly one tick per invocation; how fast that happens in wall-clock terms
//! is a presentation concern held in `SimClock`:
//!
//!   interval = 1 / ticks_per_second
//!
//! A rate of `0` means "unpaced": the runner steps as fast as it can.

use std::fmt;
use std::time::Duration;

use crate::{CovError, CovResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and the external tick-rate setting.
///
/// The scheduler only ever calls [`advance`](Self::advance).  Runners that
/// pace the simulation for display read [`tick_interval`](Self::tick_interval)
/// and sleep between steps.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Requested ticks per wall-clock second.  `0.0` means unpaced.
    pub ticks_per_second: f64,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create an unpaced clock at tick 0.
    pub fn new() -> Self {
        Self { ticks_per_second: 0.0, current_tick: Tick::ZERO }
    }

    /// Change the tick rate.  Rejects negative and non-finite values.
    pub fn set_rate(&mut self, ticks_per_second: f64) -> CovResult<()> {
        if !ticks_per_second.is_finite() || ticks_per_second < 0.0 {
            return Err(CovError::TickRate(ticks_per_second));
        }
        self.ticks_per_second = ticks_per_second;
        Ok(())
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Wall-clock time budget for one tick, or `None` when unpaced.
    pub fn tick_interval(&self) -> Option<Duration> {
        if self.ticks_per_second > 0.0 {
            Some(Duration::from_secs_f64(1.0 / self.ticks_per_second))
        } else {
            None
        }
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ticks_per_second > 0.0 {
            write!(f, "{} @ {} tick/s", self.current_tick, self.ticks_per_second)
        } else {
            write!(f, "{} (unpaced)", self.current_tick)
        }
    }
}

// ── Discipline ────────────────────────────────────────────────────────────────

/// Which scheduling model drives the agents.  Selected once at construction.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Discipline {
    /// Every unsettled agent acts every tick against a common snapshot.
    #[default]
    Synchronous,
    /// Each agent is active with probability `p` per tick; spawning is gated
    /// by the same probability.
    Asynchronous { p: f64 },
}

impl Discipline {
    /// Select the discipline from an optional activation rate: `None` is
    /// synchronous, `Some(p)` is asynchronous and requires `p ∈ [0, 1]`.
    pub fn from_activation(p: Option<f64>) -> CovResult<Self> {
        match p {
            None => Ok(Discipline::Synchronous),
            Some(p) if (0.0..=1.0).contains(&p) => Ok(Discipline::Asynchronous { p }),
            Some(p) => Err(CovError::ActivationRate(p)),
        }
    }

    #[inline]
    pub fn is_async(self) -> bool {
        matches!(self, Discipline::Asynchronous { .. })
    }

    /// Activation probability; `1.0` for the synchronous model.
    #[inline]
    pub fn activation_rate(self) -> f64 {
        match self {
            Discipline::Synchronous       => 1.0,
            Discipline::Asynchronous { p } => p,
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discipline::Synchronous        => f.write_str("sync"),
            Discipline::Asynchronous { p } => write!(f, "async(p={p})"),
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Built by the application (usually from CLI flags) and handed to the
/// simulation builder.  Never mutated during a run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Total ticks for a full run.  The runner stops here even if the
    /// region is not yet packed.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Synchronous or asynchronous scheduling.
    pub discipline: Discipline,

    /// Emit a snapshot every N ticks.  1 = every tick; 0 = never.
    pub output_interval_ticks: u64,
}

impl SimConfig {
    /// A synchronous configuration with snapshots every tick.
    pub fn synchronous(total_ticks: u64, seed: u64) -> Self {
        Self {
            total_ticks,
            seed,
            discipline: Discipline::Synchronous,
            output_interval_ticks: 1,
        }
    }

    /// An asynchronous configuration; fails if `p` is outside `[0, 1]`.
    pub fn asynchronous(total_ticks: u64, seed: u64, p: f64) -> CovResult<Self> {
        Ok(Self {
            total_ticks,
            seed,
            discipline: Discipline::from_activation(Some(p))?,
            output_interval_ticks: 1,
        })
    }

    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Re-check invariants of a hand-assembled config.
    pub fn validate(&self) -> CovResult<()> {
        if let Discipline::Asynchronous { p } = self.discipline {
            if !(0.0..=1.0).contains(&p) {
                return Err(CovError::ActivationRate(p));
            }
        }
        Ok(())
    }
}
