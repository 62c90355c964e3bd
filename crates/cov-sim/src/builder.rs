//! Fluent builder for constructing a [`Sim`].

use cov_agent::{AgentRngs, AgentStore};
use cov_core::{SimClock, SimConfig, SimRng};
use cov_grid::GridMap;
use tracing::debug;

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total ticks, seed, discipline, snapshot interval
/// - [`GridMap`] — from `cov_grid::load_map_file` or
///   `GridMap::from_classification`
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default   |
/// |------------------|-----------|
/// | `.tick_rate(r)`  | unpaced   |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, grid)
///     .tick_rate(20.0)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:    SimConfig,
    grid:      GridMap,
    tick_rate: Option<f64>,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, grid: GridMap) -> Self {
        Self { config, grid, tick_rate: None }
    }

    /// Requested ticks per wall-clock second, read back by runners through
    /// `sim.clock.tick_interval()`.  `0.0` means unpaced.
    pub fn tick_rate(mut self, ticks_per_second: f64) -> Self {
        self.tick_rate = Some(ticks_per_second);
        self
    }

    /// Validate inputs, clear the occupancy registry, and return a
    /// ready-to-run [`Sim`] with no agents at tick 0.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let mut clock = SimClock::new();
        if let Some(rate) = self.tick_rate {
            clock.set_rate(rate)?;
        }

        let mut grid = self.grid;
        grid.rebuild(std::iter::empty())?;
        let reachable = grid.reachable_free_cells();
        debug!(
            width = grid.width(),
            height = grid.height(),
            source = %grid.source(),
            reachable,
            discipline = %self.config.discipline,
            "simulation built"
        );

        Ok(Sim {
            clock,
            rngs:     AgentRngs::new(self.config.seed),
            sim_rng:  SimRng::new(self.config.seed),
            agents:   AgentStore::new(),
            grid,
            config:   self.config,
            reachable,
            makespan: None,
        })
    }
}
