//! `cov-behavior` — the per-agent decision rule.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`intent`]  | `Decision`, `Intent`, `SettleReason`, `WaitReason`              |
//! | [`context`] | `GridView<'a>` — read-only tick snapshot shared by all agents   |
//! | [`decide`]  | `decide` — one function for both disciplines                    |
//!
//! # Design notes
//!
//! The two-phase tick loop in cov-sim works as follows:
//!
//! 1. **Decide phase** (optionally parallel): for every unsettled, active
//!    agent call [`decide`].  All reads go through `&GridView` and
//!    `&AgentStore`; nothing is mutated.
//!
//! 2. **Commit phase** (sequential): consume the collected [`Decision`]s,
//!    update headings and settlement, move agents, and rebuild the grid.
//!
//! The synchronous and asynchronous variants differ only in which obstacle
//! predicate [`GridView`] applies and in the extra "defer while a neighbour
//! is broadcasting" checks, so the discipline is a tag on the view rather
//! than a separate type.

pub mod context;
pub mod decide;
pub mod intent;


pub use context::GridView;
pub use decide::decide;
pub use intent::{Decision, Intent, SettleReason, WaitReason};
