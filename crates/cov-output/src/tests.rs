//! Integration tests for cov-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, SNAPSHOT_HEADER, SUMMARY_HEADER};
    use crate::row::{AgentSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(agent_id: u32, tick: u64) -> AgentSnapshotRow {
        AgentSnapshotRow {
            agent_id,
            tick,
            x:       agent_id as i32 + 1,
            y:       2,
            settled: agent_id == 0,
            active:  false,
        }
    }

    fn read_all(path: &std::path::Path) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("a");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("agent_snapshots.csv").exists());
        assert!(nested.join("tick_summaries.csv").exists());
    }

    #[test]
    fn headers_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (h1, rows1) = read_all(&dir.path().join("agent_snapshots.csv"));
        assert_eq!(h1, SNAPSHOT_HEADER);
        assert!(rows1.is_empty());

        let (h2, _) = read_all(&dir.path().join("tick_summaries.csv"));
        assert_eq!(h2, SUMMARY_HEADER);
    }

    #[test]
    fn snapshot_rows_flags_as_digits() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 5), snap_row(1, 5)]).unwrap();
        w.finish().unwrap();

        let (_, rows) = read_all(&dir.path().join("agent_snapshots.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "0"); // agent_id
        assert_eq!(&rows[0][2], "1"); // x
        assert_eq!(&rows[0][4], "1"); // settled
        assert_eq!(&rows[1][4], "0");
        assert_eq!(&rows[1][5], "0"); // active
    }

    #[test]
    fn tick_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = TickSummaryRow {
            tick:      3,
            agents:    4,
            settled:   1,
            active:    3,
            moved:     2,
            conflicts: 0,
            spawned:   true,
        };
        w.write_tick_summary(&row).unwrap();
        w.finish().unwrap();

        let (_, rows) = read_all(&dir.path().join("tick_summaries.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["3", "4", "1", "3", "2", "0", "1"]);
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use cov_core::SimConfig;
    use cov_grid::parse_map;
    use cov_sim::SimBuilder;

    use crate::{CsvWriter, OutputWriter, SimOutputObserver};

    #[test]
    fn writes_one_summary_per_tick() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SimConfig::synchronous(6, 1);
        config.output_interval_ticks = 2;
        let grid = parse_map("...\n.S.\n...\n").unwrap();
        let mut sim = SimBuilder::new(config, grid).build().unwrap();

        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 6);

        // Snapshots after 2, 4, 6 ticks hold 1, 2, 3 agents (one spawn every
        // other tick while each newcomer clears the source).
        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let ticks: Vec<String> = rdr.records().map(|r| r.unwrap()[1].to_owned()).collect();
        assert_eq!(ticks.len(), 6);
        assert_eq!(ticks.iter().filter(|t| *t == "2").count(), 1);
        assert_eq!(ticks.iter().filter(|t| *t == "4").count(), 2);
        assert_eq!(ticks.iter().filter(|t| *t == "6").count(), 3);
    }

    /// Fails every write, to check the first error is kept.
    struct Broken(u32);

    impl OutputWriter for Broken {
        fn write_snapshots(&mut self, _: &[crate::AgentSnapshotRow]) -> crate::OutputResult<()> {
            self.0 += 1;
            Err(std::io::Error::other(format!("snapshot {}", self.0)).into())
        }
        fn write_tick_summary(&mut self, _: &crate::TickSummaryRow) -> crate::OutputResult<()> {
            self.0 += 1;
            Err(std::io::Error::other(format!("summary {}", self.0)).into())
        }
        fn finish(&mut self) -> crate::OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn keeps_first_error() {
        let grid = parse_map("S.\n").unwrap();
        let mut sim = SimBuilder::new(SimConfig::synchronous(3, 1), grid).build().unwrap();
        let mut obs = SimOutputObserver::new(Broken(0));
        sim.run(&mut obs).unwrap();
        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("summary 1"));
        assert!(obs.take_error().is_none());
    }
}
