//! Decisions — what an agent wants to do this tick.

use cov_core::{Cell, Direction};

/// Why an agent settled.  Reported to logs and tests only; every reason has
/// the same effect.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SettleReason {
    /// All four neighbours are obstacles.
    Enclosed,
    /// Exactly three neighbours are obstacles.
    DeadEnd,
    /// The cell diagonally opposite the obstacles is free.
    DiagonalFree,
    /// The diagonal cell is where the agent stood two moves ago.
    LoopClosed,
    /// Synchronous only: boxed in before two moves were made.
    ShortHistory,
}

/// Why an agent took no action.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WaitReason {
    /// Asynchronous only: picking a first heading while a neighbour is still
    /// moving.
    NeighbourBroadcasting,
    /// Asynchronous only: the primary or secondary target holds an unsettled
    /// agent.
    TargetBroadcasting,
    /// No free neighbour other than the cell just left.
    NoExit,
}

/// The action part of a [`Decision`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Intent {
    /// Step into the adjacent free cell `to`.
    Move { to: Cell },
    /// Become permanently static.
    Settle(SettleReason),
    /// Do nothing this tick.
    Wait(WaitReason),
}

/// Output of [`decide`](crate::decide) for one agent.
///
/// `heading` is `Some` when the agent adopts a new primary direction; it is
/// applied even if the intent is [`Intent::Wait`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Decision {
    pub intent:  Intent,
    pub heading: Option<Direction>,
}

impl Decision {
    #[inline]
    pub fn settle(reason: SettleReason) -> Self {
        Self { intent: Intent::Settle(reason), heading: None }
    }

    #[inline]
    pub fn wait(reason: WaitReason, heading: Option<Direction>) -> Self {
        Self { intent: Intent::Wait(reason), heading }
    }

    #[inline]
    pub fn move_to(to: Cell, heading: Option<Direction>) -> Self {
        Self { intent: Intent::Move { to }, heading }
    }

    /// Target cell if this is a move.
    #[inline]
    pub fn target(&self) -> Option<Cell> {
        match self.intent {
            Intent::Move { to } => Some(to),
            _ => None,
        }
    }
}
