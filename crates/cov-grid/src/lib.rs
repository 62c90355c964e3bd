//! `cov-grid` — the region agents spread over.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`kind`]      | `CellKind` — per-cell classification from a map loader      |
//! | [`map`]       | `GridMap` — padded wall mask + single-occupant registry     |
//! | [`loader`]    | Text map format (`#` wall, `S` source, `.` free)            |
//! | [`analysis`]  | BFS distances, reachable cell count, geometric centre       |
//! | [`error`]     | `GridError`, `GridResult<T>`                                |
//!
//! # Occupancy model
//!
//! Walls are fixed at construction.  The occupancy registry is owned by the
//! scheduler and rebuilt from the full agent list once per tick via
//! [`GridMap::rebuild`]; a second agent claiming an occupied cell is an
//! invariant violation and fails the rebuild without touching the previous
//! registry.

pub mod analysis;
pub mod error;
pub mod kind;
pub mod loader;
pub mod map;

#[cfg(test)]
mod tests;

pub use error::{GridError, GridResult};
pub use kind::CellKind;
pub use loader::{load_map_file, load_map_reader, parse_map};
pub use map::GridMap;
