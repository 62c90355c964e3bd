//! Unit tests for cov-agent.

use cov_core::{AgentId, Cell, Direction, Tick};

use crate::{AgentRngs, AgentStore, History};

#[cfg(test)]
mod history_tests {
    use super::*;

    #[test]
    fn consecutive_duplicates_are_dropped() {
        let mut h = History::new();
        assert!(h.push(Cell::new(1, 1)));
        assert!(!h.push(Cell::new(1, 1)));
        assert!(h.push(Cell::new(1, 2)));
        assert!(h.push(Cell::new(1, 1)));
        assert_eq!(h.as_slice(), &[Cell::new(1, 1), Cell::new(1, 2), Cell::new(1, 1)]);
    }

    #[test]
    fn last_and_two_back() {
        let mut h = History::new();
        assert_eq!(h.last(), None);
        assert_eq!(h.two_back(), None);
        h.push(Cell::new(0, 0));
        assert_eq!(h.last(), Some(Cell::new(0, 0)));
        assert_eq!(h.two_back(), None);
        h.push(Cell::new(0, 1));
        assert_eq!(h.last(), Some(Cell::new(0, 1)));
        assert_eq!(h.two_back(), Some(Cell::new(0, 0)));
        assert_eq!(h.len(), 2);
    }
}

#[cfg(test)]
mod store_tests {
    use super::*;

    #[test]
    fn spawn_assigns_dense_ids() {
        let mut store = AgentStore::new();
        assert!(store.is_empty());
        let a = store.spawn(Cell::new(2, 2), Tick(0), true);
        let b = store.spawn(Cell::new(2, 2), Tick(1), false);
        assert_eq!((a, b), (AgentId(0), AgentId(1)));
        assert_eq!(store.count, 2);
        assert_eq!(store.position.len(), 2);
        assert_eq!(store.history.len(), 2);
        assert_eq!(store.spawned_at, vec![Tick(0), Tick(1)]);
        assert_eq!(store.active, vec![true, false]);
    }

    #[test]
    fn commit_move_records_history() {
        let mut store = AgentStore::new();
        let a = store.spawn(Cell::new(2, 2), Tick(0), true);
        store.intended[a.index()] = Cell::new(2, 1);
        assert!(store.commit_move(a));
        assert_eq!(store.position[a.index()], Cell::new(2, 1));
        assert_eq!(store.history[a.index()].last(), Some(Cell::new(2, 2)));
        assert_eq!(store.moves[a.index()], 1);

        // No proposal → no move, no history entry.
        assert!(!store.commit_move(a));
        assert_eq!(store.history[a.index()].len(), 1);
    }

    #[test]
    fn cancel_move_restores_intended() {
        let mut store = AgentStore::new();
        let a = store.spawn(Cell::new(2, 2), Tick(0), true);
        store.intended[a.index()] = Cell::new(3, 2);
        store.cancel_move(a);
        assert!(!store.commit_move(a));
        assert_eq!(store.position[a.index()], Cell::new(2, 2));
    }

    #[test]
    fn settle_is_monotonic_and_keeps_first_tick() {
        let mut store = AgentStore::new();
        let a = store.spawn(Cell::new(1, 1), Tick(0), true);
        store.settle(a, Tick(4));
        store.settle(a, Tick(9));
        assert!(store.settled[a.index()]);
        assert!(!store.active[a.index()]);
        assert_eq!(store.settled_at[a.index()], Some(Tick(4)));
        assert!(store.all_settled());
        assert!(store.unsettled().is_empty());
    }

    #[test]
    fn all_settled_is_false_when_empty() {
        assert!(!AgentStore::new().all_settled());
    }

    #[test]
    fn secondary_is_rotated_primary() {
        let mut store = AgentStore::new();
        let a = store.spawn(Cell::new(1, 1), Tick(0), true);
        assert_eq!(store.secondary(a), None);
        store.primary[a.index()] = Some(Direction::Up);
        assert_eq!(store.secondary(a), Some(Direction::Right));
        store.primary[a.index()] = Some(Direction::Left);
        assert_eq!(store.secondary(a), Some(Direction::Up));
    }

    #[test]
    fn positions_pairs_ids() {
        let mut store = AgentStore::new();
        store.spawn(Cell::new(1, 1), Tick(0), true);
        store.spawn(Cell::new(2, 1), Tick(1), true);
        let pairs: Vec<_> = store.positions().collect();
        assert_eq!(pairs, vec![(AgentId(0), Cell::new(1, 1)), (AgentId(1), Cell::new(2, 1))]);
    }
}

#[cfg(test)]
mod rng_tests {
    use super::*;

    #[test]
    fn rngs_follow_spawn_order() {
        let mut a = AgentRngs::new(99);
        let mut b = AgentRngs::new(99);
        for i in 0..3 {
            a.push(AgentId(i));
            b.push(AgentId(i));
        }
        assert_eq!(a.len(), 3);
        for _ in 0..32 {
            assert_eq!(a.get_mut(AgentId(2)).gen_bool(0.5), b.get_mut(AgentId(2)).gen_bool(0.5));
        }
    }
}
