//! Read-only grid snapshot passed to every decision.

use cov_core::{Cell, Discipline};
use cov_grid::GridMap;

/// The grid as every agent sees it during one decide phase.
///
/// Built once per tick by cov-sim and shared immutably across all agents.
/// The discipline tag selects the obstacle predicate:
///
/// | Discipline    | `is_blocked(c)`                      | `is_broadcasting(c)` |
/// |---------------|--------------------------------------|----------------------|
/// | synchronous   | wall or any agent                    | always `false`       |
/// | asynchronous  | wall or settled agent                | unsettled agent      |
///
/// `is_free` is the same for both: neither wall nor agent.
pub struct GridView<'a> {
    pub grid:       &'a GridMap,
    /// Settlement flags indexed by `AgentId`, frozen at the start of the tick.
    pub settled:    &'a [bool],
    pub discipline: Discipline,
}

impl<'a> GridView<'a> {
    #[inline]
    pub fn new(grid: &'a GridMap, settled: &'a [bool], discipline: Discipline) -> Self {
        Self { grid, settled, discipline }
    }

    /// Neither wall nor agent.
    #[inline]
    pub fn is_free(&self, cell: Cell) -> bool {
        !self.grid.is_occupied(cell)
    }

    /// Counts as an obstacle for the enclosure, corner, and diagonal tests.
    #[inline]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        match self.discipline {
            Discipline::Synchronous        => self.grid.is_occupied(cell),
            Discipline::Asynchronous { .. } => self.grid.is_permanent_obstacle(cell, self.settled),
        }
    }

    /// Holds an agent that may still move.  Never true under the synchronous
    /// discipline, where the common snapshot makes the distinction moot.
    #[inline]
    pub fn is_broadcasting(&self, cell: Cell) -> bool {
        self.discipline.is_async() && self.grid.is_broadcasting(cell, self.settled)
    }
}
