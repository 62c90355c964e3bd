//! Aggregate run metrics.
//!
//! Travel counts committed moves; energy counts ticks an agent spent active
//! and unsettled.  Both are reported as a total over all agents and as the
//! maximum of any single agent.

use std::fmt;

use cov_core::Discipline;

use crate::Sim;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunStats {
    pub discipline:      Discipline,
    pub seed:            u64,
    /// Ticks processed so far.
    pub ticks:           u64,
    pub agents:          usize,
    pub settled:         usize,
    /// Free cells reachable from the source, including the source itself.
    pub reachable_cells: usize,
    pub complete:        bool,
    /// Ticks until the region was first packed.
    pub makespan:        Option<u64>,
    pub travel_total:    u64,
    pub travel_max:      u32,
    pub energy_total:    u64,
    pub energy_max:      u32,
}

impl RunStats {
    pub fn from_sim(sim: &Sim) -> Self {
        let agents = &sim.agents;
        Self {
            discipline:      sim.config.discipline,
            seed:            sim.config.seed,
            ticks:           sim.clock.current_tick.0,
            agents:          agents.count,
            settled:         agents.settled_count(),
            reachable_cells: sim.reachable_cells(),
            complete:        sim.is_complete(),
            makespan:        sim.makespan().map(|t| t.0),
            travel_total:    agents.moves.iter().map(|&m| u64::from(m)).sum(),
            travel_max:      agents.moves.iter().copied().max().unwrap_or(0),
            energy_total:    agents.active_ticks.iter().map(|&e| u64::from(e)).sum(),
            energy_max:      agents.active_ticks.iter().copied().max().unwrap_or(0),
        }
    }

    /// Fraction of reachable cells holding an agent.
    pub fn coverage(&self) -> f64 {
        if self.reachable_cells == 0 {
            return 0.0;
        }
        self.agents as f64 / self.reachable_cells as f64
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "discipline : {} (seed {})", self.discipline, self.seed)?;
        writeln!(f, "ticks      : {}", self.ticks)?;
        writeln!(
            f,
            "agents     : {} ({} settled) over {} reachable cells ({:.1}%)",
            self.agents,
            self.settled,
            self.reachable_cells,
            self.coverage() * 100.0
        )?;
        match self.makespan {
            Some(m) => writeln!(f, "makespan   : {m}")?,
            None    => writeln!(f, "makespan   : not reached")?,
        }
        writeln!(f, "travel     : total {} / max {}", self.travel_total, self.travel_max)?;
        write!(f, "energy     : total {} / max {}", self.energy_total, self.energy_max)
    }
}
