//! Per-cell classification handed over by a map loader.

/// What a map cell is before any agent enters it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Free,
    Wall,
    /// The single spawn cell.  Free for occupancy purposes.
    Source,
}

impl CellKind {
    /// Map a text-map glyph to a kind.  Returns `None` for unknown glyphs.
    pub fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '#'             => Some(CellKind::Wall),
            'S' | 's'       => Some(CellKind::Source),
            '.' | ' '       => Some(CellKind::Free),
            _               => None,
        }
    }

    /// The canonical glyph written by text output.
    pub fn glyph(self) -> char {
        match self {
            CellKind::Free   => '.',
            CellKind::Wall   => '#',
            CellKind::Source => 'S',
        }
    }
}
