//! `cov-agent` — Structure-of-Arrays agent storage for the cover simulation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`history`]   | `History` — dedup-on-append trail of visited cells        |
//! | [`store`]     | `AgentStore` (SoA arena), `AgentRngs` (per-agent RNG)     |
//!
//! Agents are only ever appended (one spawn per tick at most) and never
//! removed, so `AgentId(n)` is simply the index of the `n`-th spawn in every
//! array.

pub mod history;
pub mod store;

#[cfg(test)]
mod tests;

pub use history::History;
pub use store::{AgentRngs, AgentStore};
