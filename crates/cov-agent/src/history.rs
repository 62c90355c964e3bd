//! Per-agent trail of previously occupied cells.

use cov_core::Cell;

/// Append-only sequence of cells an agent has left, oldest first.
///
/// A cell is appended when the agent moves away from it, unless it equals the
/// most recent entry.  The decision rule reads exactly two entries:
///
/// - [`last`](Self::last): the cell the agent just came from, which it may
///   not turn straight back into when re-routing;
/// - [`two_back`](Self::two_back): compared with the diagonal cell to detect
///   that the agent is circling the same corner.
///
/// Length is bounded by the number of moves, which in practice is bounded by
/// the reachable region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct History(Vec<Cell>);

impl History {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append `cell` unless it repeats the last entry.  Returns `true` if it
    /// was appended.
    pub fn push(&mut self, cell: Cell) -> bool {
        if self.0.last() == Some(&cell) {
            return false;
        }
        self.0.push(cell);
        true
    }

    /// Most recently left cell.
    #[inline]
    pub fn last(&self) -> Option<Cell> {
        self.0.last().copied()
    }

    /// The entry before [`last`](Self::last).
    #[inline]
    pub fn two_back(&self) -> Option<Cell> {
        self.0.len().checked_sub(2).map(|i| self.0[i])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Cell] {
        &self.0
    }
}
