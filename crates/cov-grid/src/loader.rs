//! Text map loader.
//!
//! # Format
//!
//! One text line per grid row, top row first:
//!
//! ```text
//! #######
//! #..#..#
//! #..S..#
//! #.....#
//! #######
//! ```
//!
//! | Glyph       | Meaning                          |
//! |-------------|----------------------------------|
//! | `#`         | wall                             |
//! | `S` / `s`   | source (exactly one)             |
//! | `.` / space | free                             |
//!
//! Lines starting with `;` are comments.  Trailing blank lines are ignored.
//! Short lines are padded with free cells up to the longest line; the wall
//! border added by [`GridMap`] closes them off.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::{CellKind, GridError, GridMap, GridResult};

/// Load a map from a text file.
pub fn load_map_file(path: &Path) -> GridResult<GridMap> {
    let file = std::fs::File::open(path)?;
    load_map_reader(file)
}

/// Like [`load_map_file`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded maps.
pub fn load_map_reader<R: Read>(reader: R) -> GridResult<GridMap> {
    let mut text = String::new();
    for line in BufReader::new(reader).lines() {
        text.push_str(&line?);
        text.push('\n');
    }
    parse_map(&text)
}

/// Parse a map held in memory.
pub fn parse_map(text: &str) -> GridResult<GridMap> {
    let mut rows: Vec<Vec<CellKind>> = Vec::new();

    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.starts_with(';') {
            continue;
        }
        let row = line
            .chars()
            .enumerate()
            .map(|(col, ch)| {
                CellKind::from_glyph(ch).ok_or(GridError::Parse {
                    line:   line_no + 1,
                    column: col + 1,
                    ch,
                })
            })
            .collect::<GridResult<Vec<_>>>()?;
        rows.push(row);
    }

    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, CellKind::Free);
    }

    GridMap::from_classification(&rows)
}
