//! `GridMap` — padded wall mask plus the per-tick occupancy registry.
//!
//! # Data layout
//!
//! Both the wall mask and the registry are flat row-major `Vec`s of length
//! `width * height`.  A cell `(x, y)` lives at index `y * width + x`.
//!
//! The stored dimensions include the one-cell wall border added at
//! construction, so the classified input row `r`, column `c` becomes cell
//! `(c + 1, r + 1)`.

use cov_core::{AgentId, Cell};

use crate::{CellKind, GridError, GridResult};

/// The region agents spread over.
///
/// Do not construct directly from raw vectors; use
/// [`GridMap::from_classification`] or the text loader.
#[derive(Clone, Debug)]
pub struct GridMap {
    width:     usize,
    height:    usize,
    walls:     Vec<bool>,
    occupants: Vec<Option<AgentId>>,
    source:    Cell,
}

impl GridMap {
    // ── Construction ──────────────────────────────────────────────────────

    /// Build a map from a rectangular classification grid (rows of cells,
    /// top row first) and surround it with a permanent wall border.
    ///
    /// # Errors
    ///
    /// - [`GridError::Empty`] if there are no rows or the first row is empty.
    /// - [`GridError::Ragged`] if rows differ in length.
    /// - [`GridError::NoSource`] / [`GridError::MultipleSources`] unless
    ///   exactly one cell is [`CellKind::Source`].
    pub fn from_classification<R: AsRef<[CellKind]>>(rows: &[R]) -> GridResult<Self> {
        let inner_h = rows.len();
        let inner_w = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if inner_h == 0 || inner_w == 0 {
            return Err(GridError::Empty);
        }

        let width  = inner_w + 2;
        let height = inner_h + 2;
        let mut walls = vec![true; width * height];
        let mut sources: Vec<Cell> = Vec::new();

        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != inner_w {
                return Err(GridError::Ragged { row: r, expected: inner_w, got: row.len() });
            }
            for (c, &kind) in row.iter().enumerate() {
                let (x, y) = (c + 1, r + 1);
                walls[y * width + x] = kind == CellKind::Wall;
                if kind == CellKind::Source {
                    sources.push(Cell::new(x as i32, y as i32));
                }
            }
        }

        let source = match sources.as_slice() {
            []       => return Err(GridError::NoSource),
            [single] => *single,
            [first, second, ..] => {
                return Err(GridError::MultipleSources {
                    count:  sources.len(),
                    first:  *first,
                    second: *second,
                });
            }
        };

        Ok(Self {
            width,
            height,
            walls,
            occupants: vec![None; width * height],
            source,
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    /// Padded width (input columns + 2).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Padded height (input rows + 2).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The single spawn cell.
    #[inline]
    pub fn source(&self) -> Cell {
        self.source
    }

    /// `true` if `cell` lies inside the padded grid.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    #[inline]
    fn idx(&self, cell: Cell) -> Option<usize> {
        self.contains(cell).then(|| cell.y as usize * self.width + cell.x as usize)
    }

    /// Inverse of the row-major index.
    #[inline]
    pub fn cell_at(&self, index: usize) -> Cell {
        Cell::new((index % self.width) as i32, (index / self.width) as i32)
    }

    /// Row-major iterator over every cell of the padded grid.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.width * self.height).map(|i| self.cell_at(i))
    }

    // ── Static queries ────────────────────────────────────────────────────

    /// `true` for wall cells.  Anything outside the grid counts as wall.
    #[inline]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.idx(cell).is_none_or(|i| self.walls[i])
    }

    /// Row-major wall mask of the padded grid.
    #[inline]
    pub fn wall_mask(&self) -> &[bool] {
        &self.walls
    }

    /// Number of non-wall cells, including the source.
    pub fn open_cell_count(&self) -> usize {
        self.walls.iter().filter(|&&w| !w).count()
    }

    /// Classification of `cell` as it was loaded.
    pub fn kind(&self, cell: Cell) -> CellKind {
        if self.is_wall(cell) {
            CellKind::Wall
        } else if cell == self.source {
            CellKind::Source
        } else {
            CellKind::Free
        }
    }

    // ── Occupancy queries ─────────────────────────────────────────────────

    /// The agent standing on `cell`, if any.
    #[inline]
    pub fn occupant(&self, cell: Cell) -> Option<AgentId> {
        self.idx(cell).and_then(|i| self.occupants[i])
    }

    /// Wall or agent.
    #[inline]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.occupant(cell).is_some() || self.is_wall(cell)
    }

    /// `true` if an unsettled agent stands on `cell`.
    ///
    /// `settled` is indexed by `AgentId` and must cover every agent in the
    /// registry.
    #[inline]
    pub fn is_broadcasting(&self, cell: Cell, settled: &[bool]) -> bool {
        self.occupant(cell).is_some_and(|a| !settled[a.index()])
    }

    /// Wall or settled agent: something that will never move again.
    #[inline]
    pub fn is_permanent_obstacle(&self, cell: Cell, settled: &[bool]) -> bool {
        self.is_occupied(cell) && !self.is_broadcasting(cell, settled)
    }

    // ── Registry maintenance ──────────────────────────────────────────────

    /// Clear the registry and repopulate it from `(agent, position)` pairs.
    ///
    /// The new registry is built on the side and only swapped in if every
    /// position is valid, so a failed rebuild leaves the previous tick's
    /// occupancy untouched.
    ///
    /// # Errors
    ///
    /// [`GridError::Collision`], [`GridError::AgentOnWall`], or
    /// [`GridError::OutOfBounds`].  All of them are invariant violations.
    pub fn rebuild<I>(&mut self, agents: I) -> GridResult<()>
    where
        I: IntoIterator<Item = (AgentId, Cell)>,
    {
        let mut fresh: Vec<Option<AgentId>> = vec![None; self.width * self.height];
        for (agent, cell) in agents {
            let Some(i) = self.idx(cell) else {
                return Err(GridError::OutOfBounds { cell, agent });
            };
            if self.walls[i] {
                return Err(GridError::AgentOnWall { cell, agent });
            }
            if let Some(first) = fresh[i] {
                return Err(GridError::Collision { cell, first, second: agent });
            }
            fresh[i] = Some(agent);
        }
        self.occupants = fresh;
        Ok(())
    }

    /// Number of cells currently holding an agent.
    pub fn occupied_count(&self) -> usize {
        self.occupants.iter().filter(|o| o.is_some()).count()
    }
}
