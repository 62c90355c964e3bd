//! `cov-sim` — tick loop orchestrator for the cover simulation.
//!
//! # Two-phase tick loop
//!
//! ```text
//! every tick:
//!   ① Activation — each unsettled agent is active (synchronous) or draws
//!                  active with probability p from its own RNG (asynchronous).
//!   ② Decide     — cov_behavior::decide for every active agent against the
//!                  grid as it stood at the end of the previous tick
//!                  (parallel with the `parallel` feature).
//!   ③ Commit     — in ascending AgentId order: apply headings, settle,
//!                  claim target cells (asynchronous: first claim wins),
//!                  validate the new occupancy, move.
//!   ④ Spawn      — if the source was free before ③ and still is, add one
//!                  agent there (asynchronous: only with probability p).
//!   ⑤ Report     — tick summary and, at snapshot intervals, a Snapshot
//!                  labelled with the post-tick clock.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the decide phase on Rayon's thread pool.          |
//! | `fx-hash`  | FxHash for the per-tick claim index.                   |
//! | `serde`    | `Serialize` for `Snapshot`, `TickSummary`, `RunStats`. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cov_core::SimConfig;
//! use cov_grid::load_map_file;
//! use cov_sim::{NoopObserver, SimBuilder};
//!
//! let grid = load_map_file("maps/room.map".as_ref())?;
//! let mut sim = SimBuilder::new(SimConfig::synchronous(500, 42), grid).build()?;
//! sim.run_until_complete(500, &mut NoopObserver)?;
//! println!("{}", sim.stats());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;
pub mod stats;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use snapshot::{AgentView, Snapshot, TickSummary};
pub use stats::RunStats;
