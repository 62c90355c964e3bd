//! Grid geometry: cell coordinates and the four cardinal headings.
//!
//! # Coordinate system
//!
//! `x` grows to the right and `y` grows **downward**, so "up" is `(0, -1)`.
//! Every map is padded with a permanent wall border, which means a neighbour
//! lookup from any cell an agent can stand on is always in bounds.

use std::fmt;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// Integer coordinate of one grid cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The orthogonal neighbour one step in `dir`.
    #[inline]
    pub fn step(self, dir: Direction) -> Cell {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }

    /// Translate by an arbitrary `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Cell {
        Cell::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbours in [`Direction::SCAN`] order.
    #[inline]
    pub fn neighbours(self) -> [Cell; 4] {
        Direction::SCAN.map(|d| self.step(d))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the four cardinal headings.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Fixed scan order used wherever the decision rule picks "the first free
    /// neighbour".
    pub const SCAN: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit offset `(dx, dy)`.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up    => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down  => (0, 1),
            Direction::Left  => (-1, 0),
        }
    }

    /// Rotate by 90° with `(dx, dy) → (-dy, dx)`.
    ///
    /// With `y` pointing down this is a clockwise turn:
    /// up → right → down → left → up.
    #[inline]
    pub const fn rotate90(self) -> Direction {
        match self {
            Direction::Up    => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down  => Direction::Left,
            Direction::Left  => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up    => "up",
            Direction::Right => "right",
            Direction::Down  => "down",
            Direction::Left  => "left",
        };
        f.write_str(name)
    }
}
