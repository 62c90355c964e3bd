//! The `Sim` struct and its tick loop.

use cov_agent::{AgentRngs, AgentStore};
use cov_behavior::{Decision, GridView, Intent, decide};
use cov_core::{AgentId, Cell, Discipline, SimClock, SimConfig, SimRng, Tick};
use cov_grid::GridMap;
use tracing::{debug, error, info, trace};

use crate::{RunStats, SimObserver, SimResult, Snapshot, TickSummary};

#[cfg(feature = "fx-hash")]
type ClaimMap = rustc_hash::FxHashMap<Cell, AgentId>;
#[cfg(not(feature = "fx-hash"))]
type ClaimMap = std::collections::HashMap<Cell, AgentId>;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim` holds all simulation state and drives the tick loop:
///
/// 1. **Activation**: every unsettled agent is active under the synchronous
///    discipline; under the asynchronous one each draws from its own RNG.
/// 2. **Decide phase** (optionally parallel with the `parallel` feature):
///    call [`decide`] for each active agent against a frozen [`GridView`].
/// 3. **Commit phase** (sequential, ascending `AgentId` for determinism):
///    - `Settle`        → mark settled.
///    - `Move { to }`   → record the proposal; asynchronously, a cell
///                        already claimed this tick cancels the later move.
///    - `Wait`          → nothing.
///
///    The proposed occupancy is validated before any agent moves.
/// 4. **Spawn**: one new agent on the source cell if the source was free
///    before the commit phase and is still free after it (gated by the
///    simulation RNG under the asynchronous discipline).  An agent that
///    leaves the source is therefore replaced one tick later, never in the
///    same tick.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (total ticks, seed, discipline, …).
    pub config: SimConfig,

    /// Current tick and pacing rate.
    pub clock: SimClock,

    /// Walls and the occupancy registry, rebuilt once per tick.
    pub grid: GridMap,

    /// Agent state (SoA arrays).  Grows by at most one agent per tick.
    pub agents: AgentStore,

    /// Per-agent activation RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    /// Spawn gate RNG, independent of every agent's stream.
    pub(crate) sim_rng: SimRng,

    /// Free cells reachable from the source.
    pub(crate) reachable: usize,

    /// Tick count at which the region was first packed.
    pub(crate) makespan: Option<Tick>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.observed_step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.observed_step(observer)?;
        }
        Ok(())
    }

    /// Run until the region is packed or `limit` more ticks have passed.
    ///
    /// Returns the makespan if the region is packed.
    pub fn run_until_complete<O: SimObserver>(
        &mut self,
        limit:    u64,
        observer: &mut O,
    ) -> SimResult<Option<Tick>> {
        for _ in 0..limit {
            if self.is_complete() {
                break;
            }
            self.observed_step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(self.makespan)
    }

    /// Advance exactly one tick without observer callbacks.
    pub fn step(&mut self) -> SimResult<TickSummary> {
        let now = self.clock.current_tick;
        let summary = self.process_tick(now)?;
        self.clock.advance();
        if self.makespan.is_none() && self.is_complete() {
            self.makespan = Some(self.clock.current_tick);
            info!(
                makespan = self.clock.current_tick.0,
                agents = self.agents.count,
                "region packed"
            );
        }
        Ok(summary)
    }

    /// `true` once every agent is settled and a settled agent holds the
    /// source.  Nothing changes after this point: no agent moves and the
    /// source is never free again.
    pub fn is_complete(&self) -> bool {
        self.agents.all_settled() && self.grid.occupant(self.grid.source()).is_some()
    }

    /// Tick count at which [`is_complete`](Self::is_complete) first held.
    pub fn makespan(&self) -> Option<Tick> {
        self.makespan
    }

    /// Free cells reachable from the source, computed once at build time.
    pub fn reachable_cells(&self) -> usize {
        self.reachable
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::capture(self.clock.current_tick, &self.grid, &self.agents)
    }

    pub fn stats(&self) -> RunStats {
        RunStats::from_sim(self)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Snapshots carry the post-tick clock, the same label
    /// [`snapshot`](Self::snapshot) gives that state.
    fn observed_step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let summary = self.step()?;
        observer.on_tick_end(now, &summary);
        let after = self.clock.current_tick;
        if self.config.output_interval_ticks > 0
            && after.0.is_multiple_of(self.config.output_interval_ticks)
        {
            let snapshot = Snapshot::capture(after, &self.grid, &self.agents);
            observer.on_snapshot(after, &snapshot);
        }
        Ok(())
    }

    fn process_tick(&mut self, now: Tick) -> SimResult<TickSummary> {
        // ── Phase 1: activation ───────────────────────────────────────────
        let acting = self.draw_activation();
        let source_was_free = !self.grid.is_occupied(self.grid.source());

        // ── Phase 2: decide (produce) ─────────────────────────────────────
        let decisions = self.compute_decisions(&acting);

        // ── Phase 3: commit (consume) ─────────────────────────────────────
        //
        // Decisions arrive in ascending AgentId order, so claim resolution
        // and the log are identical whether or not the decide phase ran in
        // parallel.
        let conflicts = self.apply_decisions(decisions, now);
        let moved = self.commit_moves(now)?;

        // ── Phase 4: spawn ────────────────────────────────────────────────
        let spawned = source_was_free && self.try_spawn(now)?;

        Ok(TickSummary {
            tick:    now,
            agents:  self.agents.count,
            settled: self.agents.settled_count(),
            active:  acting.len(),
            moved,
            conflicts,
            spawned,
        })
    }

    /// Set every unsettled agent's `active` flag for this tick and return the
    /// active ones in ascending id order.
    fn draw_activation(&mut self) -> Vec<AgentId> {
        let discipline = self.config.discipline;
        let mut acting = Vec::new();
        for agent in self.agents.unsettled() {
            let i = agent.index();
            let active = match discipline {
                Discipline::Synchronous        => true,
                Discipline::Asynchronous { p } => self.rngs.get_mut(agent).gen_bool(p),
            };
            self.agents.active[i] = active;
            if active {
                self.agents.active_ticks[i] += 1;
                acting.push(agent);
            }
        }
        acting
    }

    /// Run the decision rule for every acting agent against the state left
    /// by the previous tick.
    ///
    /// With the `parallel` Cargo feature, decisions run on Rayon's thread
    /// pool; `collect` keeps them in input order.
    fn compute_decisions(&self, acting: &[AgentId]) -> Vec<(AgentId, Decision)> {
        let agents = &self.agents;
        let view = GridView::new(&self.grid, &agents.settled, self.config.discipline);

        #[cfg(not(feature = "parallel"))]
        {
            acting.iter().map(|&agent| (agent, decide(agent, agents, &view))).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            acting.par_iter().map(|&agent| (agent, decide(agent, agents, &view))).collect()
        }
    }

    /// Apply headings and settlements and record move proposals in
    /// `agents.intended`.  Returns the number of cancelled asynchronous moves.
    fn apply_decisions(&mut self, decisions: Vec<(AgentId, Decision)>, now: Tick) -> usize {
        let check_claims = self.config.discipline.is_async();
        let mut claims = ClaimMap::default();
        let mut conflicts = 0;

        for (agent, decision) in decisions {
            let i = agent.index();
            if let Some(heading) = decision.heading {
                self.agents.primary[i] = Some(heading);
            }
            match decision.intent {
                Intent::Settle(reason) => {
                    self.agents.settle(agent, now);
                    debug!(tick = %now, %agent, cell = %self.agents.position[i], ?reason, "settled");
                }
                Intent::Move { to } => {
                    if check_claims {
                        if let Some(&winner) = claims.get(&to) {
                            conflicts += 1;
                            trace!(tick = %now, %agent, %winner, cell = %to, "move cancelled");
                            continue;
                        }
                        claims.insert(to, agent);
                    }
                    self.agents.intended[i] = to;
                }
                Intent::Wait(reason) => {
                    trace!(tick = %now, %agent, ?reason, "waiting");
                }
            }
        }
        conflicts
    }

    /// Validate the proposed occupancy, then move every agent whose
    /// intended cell differs from its position.
    fn commit_moves(&mut self, now: Tick) -> SimResult<usize> {
        let proposed = self
            .agents
            .intended
            .iter()
            .enumerate()
            .map(|(i, &c)| (AgentId(i as u32), c));
        if let Err(e) = self.grid.rebuild(proposed) {
            error!(tick = %now, error = %e, "occupancy invariant violated");
            for i in 0..self.agents.count {
                self.agents.cancel_move(AgentId(i as u32));
            }
            return Err(e.into());
        }

        let mut moved = 0;
        for i in 0..self.agents.count {
            if self.agents.commit_move(AgentId(i as u32)) {
                moved += 1;
            }
        }
        Ok(moved)
    }

    /// Add one agent on the source cell if nothing moved onto it this tick
    /// and the gate opens.
    fn try_spawn(&mut self, now: Tick) -> SimResult<bool> {
        let source = self.grid.source();
        if self.grid.is_occupied(source) {
            return Ok(false);
        }
        let open = match self.config.discipline {
            Discipline::Synchronous        => true,
            Discipline::Asynchronous { p } => self.sim_rng.gen_bool(p),
        };
        if !open {
            return Ok(false);
        }

        let agent = self.agents.spawn(source, now, !self.config.discipline.is_async());
        self.rngs.push(agent);
        self.grid.rebuild(self.agents.positions())?;
        debug!(tick = %now, %agent, cell = %source, "spawned");
        Ok(true)
    }
}
