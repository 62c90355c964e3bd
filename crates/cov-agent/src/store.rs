//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! The tick loop draws activation flags with `&mut AgentRngs` while the
//! decide phase reads `&AgentStore`.  Keeping RNGs in a separate struct lets
//! the scheduler hold both borrows at once and keeps the decide phase a pure
//! function of the store.

use cov_core::{AgentId, AgentRng, Cell, Direction, Tick};

use crate::History;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`AgentStore`].
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
    seed:      u64,
}

impl AgentRngs {
    /// An empty set whose future members are seeded from `global_seed`.
    pub fn new(global_seed: u64) -> Self {
        Self { inner: Vec::new(), seed: global_seed }
    }

    /// Seed and append the RNG for a freshly spawned agent.
    ///
    /// Must be called once per spawn, in spawn order, so that
    /// `inner[agent.index()]` belongs to `agent`.
    pub fn push(&mut self, agent: AgentId) {
        debug_assert_eq!(agent.index(), self.inner.len());
        self.inner.push(AgentRng::new(self.seed, agent));
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays arena for all agent state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them:
///
/// ```ignore
/// let pos = store.position[agent.index()];  // O(1), cache-friendly
/// ```
///
/// Fields are `pub` for direct indexed access from the scheduler.  Only the
/// scheduler writes to them; decision logic reads them through a shared
/// borrow.
#[derive(Clone, Debug, Default)]
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Spatial state ─────────────────────────────────────────────────────
    /// Current cell.
    pub position: Vec<Cell>,

    /// Cell proposed during the decide phase.  Equal to `position` outside
    /// of it.
    pub intended: Vec<Cell>,

    // ── Decision state ────────────────────────────────────────────────────
    /// Terminal flag.  Goes false → true once and never back.
    pub settled: Vec<bool>,

    /// Asynchronous activation flag for the current tick.  Always `true` for
    /// unsettled agents under the synchronous discipline.
    pub active: Vec<bool>,

    /// Current heading, unset until the first free neighbour is found.
    pub primary: Vec<Option<Direction>>,

    /// Cells left behind, see [`History`].
    pub history: Vec<History>,

    // ── Bookkeeping ───────────────────────────────────────────────────────
    /// Tick at which the agent was created.
    pub spawned_at: Vec<Tick>,

    /// Tick at which the agent settled.
    pub settled_at: Vec<Option<Tick>>,

    /// Number of committed moves (travel distance in cells).
    pub moves: Vec<u32>,

    /// Number of ticks the agent spent active and unsettled.
    pub active_ticks: Vec<u32>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Iterator over `(agent, position)` pairs, as consumed by
    /// `GridMap::rebuild`.
    pub fn positions(&self) -> impl Iterator<Item = (AgentId, Cell)> + '_ {
        self.position.iter().enumerate().map(|(i, &c)| (AgentId(i as u32), c))
    }

    /// Ids of every agent that has not settled yet.
    pub fn unsettled(&self) -> Vec<AgentId> {
        self.agent_ids().filter(|a| !self.settled[a.index()]).collect()
    }

    pub fn settled_count(&self) -> usize {
        self.settled.iter().filter(|&&s| s).count()
    }

    /// `true` when there is at least one agent and none can move any more.
    pub fn all_settled(&self) -> bool {
        !self.is_empty() && self.settled.iter().all(|&s| s)
    }

    /// The sidestep heading: the primary heading rotated by 90°.
    #[inline]
    pub fn secondary(&self, agent: AgentId) -> Option<Direction> {
        self.primary[agent.index()].map(Direction::rotate90)
    }

    // ── Mutation (scheduler only) ─────────────────────────────────────────

    /// Append a new agent standing on `at`.  Returns its id.
    pub fn spawn(&mut self, at: Cell, now: Tick, active: bool) -> AgentId {
        let id = AgentId(self.count as u32);
        self.position.push(at);
        self.intended.push(at);
        self.settled.push(false);
        self.active.push(active);
        self.primary.push(None);
        self.history.push(History::new());
        self.spawned_at.push(now);
        self.settled_at.push(None);
        self.moves.push(0);
        self.active_ticks.push(0);
        self.count += 1;
        id
    }

    /// Mark `agent` settled at `now`.  Idempotent: the first tick is kept.
    pub fn settle(&mut self, agent: AgentId, now: Tick) {
        let i = agent.index();
        if !self.settled[i] {
            self.settled[i] = true;
            self.settled_at[i] = Some(now);
            self.active[i] = false;
        }
    }

    /// Move `agent` to its intended cell, recording the departure cell in its
    /// history.  Returns `true` if the agent moved.
    pub fn commit_move(&mut self, agent: AgentId) -> bool {
        let i = agent.index();
        let from = self.position[i];
        let to = self.intended[i];
        if from == to {
            return false;
        }
        self.history[i].push(from);
        self.position[i] = to;
        self.moves[i] += 1;
        true
    }

    /// Drop a pending proposal so `intended == position` again.
    #[inline]
    pub fn cancel_move(&mut self, agent: AgentId) {
        let i = agent.index();
        self.intended[i] = self.position[i];
    }
}
