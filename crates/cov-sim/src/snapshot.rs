//! Read-only per-tick views handed to observers.

use cov_agent::AgentStore;
use cov_core::{AgentId, Cell, Tick};
use cov_grid::{CellKind, GridMap};

/// Counters for one processed tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TickSummary {
    pub tick:      Tick,
    /// Agents in the simulation after the tick, including any new spawn.
    pub agents:    usize,
    /// Settled agents after the tick.
    pub settled:   usize,
    /// Agents that ran a decision this tick.
    pub active:    usize,
    /// Agents that changed cell.
    pub moved:     usize,
    /// Asynchronous moves dropped because a lower id claimed the same cell.
    pub conflicts: usize,
    pub spawned:   bool,
}

/// One agent as a renderer sees it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AgentView {
    pub id:       AgentId,
    pub position: Cell,
    pub settled:  bool,
    pub active:   bool,
}

/// Everything needed to draw the grid without touching simulation internals.
///
/// `walls` is the row-major mask of the padded grid and borrows from the
/// simulation; `agents` is ordered by id.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot<'a> {
    pub tick:   Tick,
    pub width:  usize,
    pub height: usize,
    pub walls:  &'a [bool],
    pub source: Cell,
    pub agents: Vec<AgentView>,
}

impl<'a> Snapshot<'a> {
    pub fn capture(tick: Tick, grid: &'a GridMap, agents: &AgentStore) -> Self {
        let views = agents
            .agent_ids()
            .map(|id| {
                let i = id.index();
                AgentView {
                    id,
                    position: agents.position[i],
                    settled:  agents.settled[i],
                    active:   agents.active[i],
                }
            })
            .collect();
        Self {
            tick,
            width:  grid.width(),
            height: grid.height(),
            walls:  grid.wall_mask(),
            source: grid.source(),
            agents: views,
        }
    }

    /// ASCII picture of the padded grid, one line per row.
    ///
    /// | Glyph | Cell                  |
    /// |-------|-----------------------|
    /// | `#`   | wall                  |
    /// | `S`   | empty source          |
    /// | `.`   | empty free cell       |
    /// | `o`   | unsettled agent       |
    /// | `@`   | settled agent         |
    pub fn render(&self) -> String {
        let mut glyphs: Vec<char> = self
            .walls
            .iter()
            .map(|&w| (if w { CellKind::Wall } else { CellKind::Free }).glyph())
            .collect();
        let idx = |c: Cell| c.y as usize * self.width + c.x as usize;
        glyphs[idx(self.source)] = CellKind::Source.glyph();
        for a in &self.agents {
            glyphs[idx(a.position)] = if a.settled { '@' } else { 'o' };
        }

        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in glyphs.chunks(self.width) {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}
