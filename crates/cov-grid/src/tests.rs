//! Unit tests for cov-grid.

use cov_core::{AgentId, Cell};

use crate::{CellKind, GridError, GridMap, parse_map};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 3×3 open room with the source in the middle (5×5 once padded).
fn room3() -> GridMap {
    parse_map("...\n.S.\n...\n").unwrap()
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction_tests {
    use super::*;

    #[test]
    fn pads_with_wall_border() {
        let map = room3();
        assert_eq!(map.width(), 5);
        assert_eq!(map.height(), 5);
        for i in 0..5 {
            assert!(map.is_wall(Cell::new(i, 0)));
            assert!(map.is_wall(Cell::new(i, 4)));
            assert!(map.is_wall(Cell::new(0, i)));
            assert!(map.is_wall(Cell::new(4, i)));
        }
        assert!(!map.is_wall(Cell::new(1, 1)));
        assert_eq!(map.open_cell_count(), 9);
    }

    #[test]
    fn source_is_offset_by_border() {
        assert_eq!(room3().source(), Cell::new(2, 2));
    }

    #[test]
    fn no_source_is_error() {
        let rows = vec![vec![CellKind::Free; 3]; 3];
        assert!(matches!(GridMap::from_classification(&rows), Err(GridError::NoSource)));
    }

    #[test]
    fn two_sources_is_error() {
        let rows = vec![vec![CellKind::Source, CellKind::Free, CellKind::Source]];
        match GridMap::from_classification(&rows) {
            Err(GridError::MultipleSources { count, first, second }) => {
                assert_eq!(count, 2);
                assert_eq!(first, Cell::new(1, 1));
                assert_eq!(second, Cell::new(3, 1));
            }
            other => panic!("expected MultipleSources, got {other:?}"),
        }
    }

    #[test]
    fn ragged_rows_rejected() {
        let rows = vec![
            vec![CellKind::Source, CellKind::Free],
            vec![CellKind::Free],
        ];
        assert!(matches!(
            GridMap::from_classification(&rows),
            Err(GridError::Ragged { row: 1, expected: 2, got: 1 })
        ));
    }

    #[test]
    fn empty_rejected() {
        let rows: Vec<Vec<CellKind>> = vec![];
        assert!(matches!(GridMap::from_classification(&rows), Err(GridError::Empty)));
    }

    #[test]
    fn out_of_bounds_counts_as_wall() {
        let map = room3();
        assert!(map.is_wall(Cell::new(-1, 2)));
        assert!(map.is_wall(Cell::new(2, 99)));
        assert!(map.is_occupied(Cell::new(-1, -1)));
        assert_eq!(map.occupant(Cell::new(-1, -1)), None);
    }

    #[test]
    fn kind_reports_classification() {
        let map = room3();
        assert_eq!(map.kind(Cell::new(2, 2)), CellKind::Source);
        assert_eq!(map.kind(Cell::new(1, 1)), CellKind::Free);
        assert_eq!(map.kind(Cell::new(0, 0)), CellKind::Wall);
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader_tests {
    use std::io::{Cursor, Write};

    use super::*;
    use crate::{load_map_file, load_map_reader};

    #[test]
    fn walls_inside_map_are_kept() {
        let map = parse_map("S#.\n...").unwrap();
        assert!(map.is_wall(Cell::new(2, 1)));
        assert!(!map.is_wall(Cell::new(3, 1)));
        assert_eq!(map.source(), Cell::new(1, 1));
    }

    #[test]
    fn short_lines_padded_with_free() {
        let map = parse_map("S\n...\n").unwrap();
        assert_eq!(map.width(), 5);
        assert!(!map.is_wall(Cell::new(3, 1)));
    }

    #[test]
    fn comments_and_trailing_blank_lines_skipped() {
        let map = parse_map("; a comment\n.S.\n\n\n").unwrap();
        assert_eq!(map.height(), 3);
        assert_eq!(map.source(), Cell::new(2, 1));
    }

    #[test]
    fn crlf_accepted() {
        let map = parse_map("...\r\n.S.\r\n").unwrap();
        assert_eq!(map.width(), 5);
    }

    #[test]
    fn unknown_glyph_reports_position() {
        match parse_map("..\n.x") {
            Err(GridError::Parse { line, column, ch }) => {
                assert_eq!((line, column, ch), (2, 2, 'x'));
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn reader_and_file_agree() {
        let text = "#...\n#.S.\n";
        let from_reader = load_map_reader(Cursor::new(text)).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        let from_file = load_map_file(file.path()).unwrap();

        assert_eq!(from_reader.wall_mask(), from_file.wall_mask());
        assert_eq!(from_reader.source(), from_file.source());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_map_file(std::path::Path::new("/definitely/not/here.map")).unwrap_err();
        assert!(matches!(err, GridError::Io(_)));
    }
}

// ── Occupancy ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod occupancy_tests {
    use super::*;

    #[test]
    fn rebuild_populates_registry() {
        let mut map = room3();
        map.rebuild([(AgentId(0), Cell::new(1, 1)), (AgentId(1), Cell::new(2, 2))]).unwrap();
        assert_eq!(map.occupant(Cell::new(1, 1)), Some(AgentId(0)));
        assert_eq!(map.occupant(Cell::new(2, 2)), Some(AgentId(1)));
        assert!(map.is_occupied(Cell::new(1, 1)));
        assert!(!map.is_occupied(Cell::new(3, 3)));
        assert_eq!(map.occupied_count(), 2);
    }

    #[test]
    fn rebuild_clears_previous_tick() {
        let mut map = room3();
        map.rebuild([(AgentId(0), Cell::new(1, 1))]).unwrap();
        map.rebuild([(AgentId(0), Cell::new(1, 2))]).unwrap();
        assert_eq!(map.occupant(Cell::new(1, 1)), None);
        assert_eq!(map.occupant(Cell::new(1, 2)), Some(AgentId(0)));
    }

    #[test]
    fn collision_fails_and_keeps_old_registry() {
        let mut map = room3();
        map.rebuild([(AgentId(0), Cell::new(1, 1))]).unwrap();
        let err = map
            .rebuild([(AgentId(0), Cell::new(3, 3)), (AgentId(1), Cell::new(3, 3))])
            .unwrap_err();
        assert!(err.is_invariant_violation());
        assert!(matches!(
            err,
            GridError::Collision { first: AgentId(0), second: AgentId(1), .. }
        ));
        assert_eq!(map.occupant(Cell::new(1, 1)), Some(AgentId(0)));
        assert_eq!(map.occupant(Cell::new(3, 3)), None);
    }

    #[test]
    fn agent_on_wall_rejected() {
        let mut map = room3();
        let err = map.rebuild([(AgentId(0), Cell::new(0, 0))]).unwrap_err();
        assert!(matches!(err, GridError::AgentOnWall { .. }));
    }

    #[test]
    fn agent_outside_rejected() {
        let mut map = room3();
        let err = map.rebuild([(AgentId(0), Cell::new(7, 7))]).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { .. }));
    }

    #[test]
    fn broadcasting_and_permanent_predicates() {
        let mut map = room3();
        map.rebuild([(AgentId(0), Cell::new(1, 1)), (AgentId(1), Cell::new(2, 1))]).unwrap();
        let settled = [true, false];

        // Settled agent behaves like a wall.
        assert!(!map.is_broadcasting(Cell::new(1, 1), &settled));
        assert!(map.is_permanent_obstacle(Cell::new(1, 1), &settled));

        // Unsettled agent is broadcasting, not permanent.
        assert!(map.is_broadcasting(Cell::new(2, 1), &settled));
        assert!(!map.is_permanent_obstacle(Cell::new(2, 1), &settled));

        // Walls are permanent, empty cells are neither.
        assert!(map.is_permanent_obstacle(Cell::new(0, 0), &settled));
        assert!(!map.is_broadcasting(Cell::new(3, 3), &settled));
        assert!(!map.is_permanent_obstacle(Cell::new(3, 3), &settled));
    }
}

// ── Analysis ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod analysis_tests {
    use super::*;

    #[test]
    fn distances_in_open_room() {
        let map = room3();
        let dist = map.distances_from(map.source());
        let at = |x: i32, y: i32| dist[y as usize * map.width() + x as usize];
        assert_eq!(at(2, 2), Some(0));
        assert_eq!(at(2, 1), Some(1));
        assert_eq!(at(1, 1), Some(2));
        assert_eq!(at(0, 0), None);
    }

    #[test]
    fn reachable_excludes_sealed_pocket() {
        // Right-hand column is cut off by a wall column.
        let map = parse_map("S#.\n.#.\n").unwrap();
        assert_eq!(map.open_cell_count(), 4);
        assert_eq!(map.reachable_free_cells(), 2);
    }

    #[test]
    fn distances_from_wall_are_all_none() {
        let map = room3();
        assert!(map.distances_from(Cell::new(0, 0)).iter().all(Option::is_none));
    }

    #[test]
    fn geometric_center_of_room_is_middle() {
        let map = parse_map("S..\n...\n...\n").unwrap();
        assert_eq!(map.geometric_center(), Some(Cell::new(2, 2)));
    }

    #[test]
    fn geometric_center_of_corridor() {
        let map = parse_map("S....").unwrap();
        assert_eq!(map.geometric_center(), Some(Cell::new(3, 1)));
    }
}
