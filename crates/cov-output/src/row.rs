//! Plain data row types written by output backends.

/// One agent at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSnapshotRow {
    pub agent_id: u32,
    pub tick:     u64,
    /// Column in the padded grid.
    pub x:        i32,
    /// Row in the padded grid, growing downward.
    pub y:        i32,
    pub settled:  bool,
    pub active:   bool,
}

/// Counters for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:      u64,
    pub agents:    u64,
    pub settled:   u64,
    pub active:    u64,
    pub moved:     u64,
    pub conflicts: u64,
    pub spawned:   bool,
}
