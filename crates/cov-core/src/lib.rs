//! `cov-core` — foundational types for the cover simulation.
//!
//! This crate is a dependency of every other `cov-*` crate.  It intentionally
//! has no `cov-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`geom`]        | `Cell`, `Direction`, scan order, rotation             |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`, `Discipline`         |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]       | `CovError`, `CovResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CovError, CovResult};
pub use geom::{Cell, Direction};
pub use ids::AgentId;
pub use rng::{AgentRng, SimRng};
pub use time::{Discipline, SimClock, SimConfig, Tick};
