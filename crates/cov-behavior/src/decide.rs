//! The wall-following rule.
//!
//! Each unsettled agent keeps a primary heading and a secondary heading (the
//! primary rotated by 90°).  It pushes along the primary, sidesteps along the
//! secondary, and settles once it is wedged into a corner of the region
//! that is already covered.  Evaluation order:
//!
//! 1. Enclosed on all four sides → settle.
//! 2. No heading yet → adopt the first free neighbour in scan order
//!    (asynchronous: defer instead while any neighbour is broadcasting).
//! 3. Primary target free → move there (asynchronous: defer if it is
//!    broadcasting).
//! 4. Secondary target free → move there (same deferral).
//! 5. Exactly three obstacle neighbours → settle.
//! 6. Diagonal test → settle.
//! 7. Otherwise re-route to any free neighbour except the one just left.

use cov_agent::AgentStore;
use cov_core::{AgentId, Cell, Direction};

use crate::{Decision, GridView, SettleReason, WaitReason};

/// Decide what `agent` does this tick.
///
/// Pure: reads `agents` and `view`, returns the decision, and leaves all
/// mutation to the caller.  The caller must only pass unsettled agents that
/// are active this tick.
pub fn decide(agent: AgentId, agents: &AgentStore, view: &GridView<'_>) -> Decision {
    let i = agent.index();
    let here = agents.position[i];
    let history = &agents.history[i];

    let blocked = Direction::SCAN.map(|d| view.is_blocked(here.step(d)));
    if blocked.iter().all(|&b| b) {
        return Decision::settle(SettleReason::Enclosed);
    }

    // ── Heading ──────────────────────────────────────────────────────────
    let (primary, adopted) = match agents.primary[i] {
        Some(d) => (d, None),
        None => {
            if here.neighbours().into_iter().any(|c| view.is_broadcasting(c)) {
                return Decision::wait(WaitReason::NeighbourBroadcasting, None);
            }
            match Direction::SCAN.into_iter().find(|&d| view.is_free(here.step(d))) {
                Some(d) => (d, Some(d)),
                // Synchronous: every neighbour holds an agent but one of them
                // is not counted as blocked.  Cannot happen; stay put.
                None => return Decision::wait(WaitReason::NoExit, None),
            }
        }
    };

    // ── Push, then sidestep ──────────────────────────────────────────────
    for dir in [primary, primary.rotate90()] {
        let target = here.step(dir);
        if view.is_broadcasting(target) {
            return Decision::wait(WaitReason::TargetBroadcasting, adopted);
        }
        if view.is_free(target) {
            return Decision::move_to(target, adopted);
        }
    }

    // ── Corner tests ─────────────────────────────────────────────────────
    if blocked.iter().filter(|&&b| b).count() == 3 {
        return Decision::settle(SettleReason::DeadEnd);
    }

    let diag = diagonal(here, &blocked);
    if !view.is_blocked(diag) {
        return Decision::settle(SettleReason::DiagonalFree);
    }
    if history.two_back() == Some(diag) {
        return Decision::settle(SettleReason::LoopClosed);
    }
    if !view.discipline.is_async() && history.len() < 2 {
        return Decision::settle(SettleReason::ShortHistory);
    }

    // ── Re-route ─────────────────────────────────────────────────────────
    let back = history.last();
    Direction::SCAN
        .into_iter()
        .map(|d| (d, here.step(d)))
        .find(|&(_, c)| Some(c) != back && view.is_free(c))
        .map(|(d, c)| Decision::move_to(c, Some(d)))
        .unwrap_or(Decision::wait(WaitReason::NoExit, adopted))
}

/// The cell diagonally opposite the blocked neighbours: `here` minus the sum
/// of the blocked direction vectors.
///
/// Only reached with exactly two blocked sides, and those always include the
/// primary and secondary headings, which are perpendicular.  The result is
/// therefore the corner cell facing away from both.
pub fn diagonal(here: Cell, blocked: &[bool; 4]) -> Cell {
    let (sx, sy) = Direction::SCAN
        .iter()
        .zip(blocked)
        .filter(|(_, b)| **b)
        .map(|(d, _)| d.delta())
        .fold((0, 0), |(ax, ay), (dx, dy)| (ax + dx, ay + dy));
    here.offset(-sx, -sy)
}
