//! Grid-subsystem error type.

use thiserror::Error;

use cov_core::{AgentId, Cell};

/// Errors produced by `cov-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("map has no source cell")]
    NoSource,

    #[error("map has {count} source cells (first at {first}, second at {second}); exactly one is required")]
    MultipleSources { count: usize, first: Cell, second: Cell },

    #[error("map is empty")]
    Empty,

    #[error("map row {row} has {got} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, got: usize },

    #[error("unrecognised map character {ch:?} at line {line}, column {column}")]
    Parse { line: usize, column: usize, ch: char },

    #[error("{second} and {first} both occupy {cell}")]
    Collision { cell: Cell, first: AgentId, second: AgentId },

    #[error("{agent} is placed on wall cell {cell}")]
    AgentOnWall { cell: Cell, agent: AgentId },

    #[error("{agent} is outside the grid at {cell}")]
    OutOfBounds { cell: Cell, agent: AgentId },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GridError {
    /// `true` for the occupancy-invariant failures raised by
    /// [`GridMap::rebuild`](crate::GridMap::rebuild), as opposed to map
    /// configuration problems.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            GridError::Collision { .. } | GridError::AgentOnWall { .. } | GridError::OutOfBounds { .. }
        )
    }
}

pub type GridResult<T> = Result<T, GridError>;
