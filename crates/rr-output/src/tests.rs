//! Integration tests for rr-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{TickSummaryRow, VehicleSnapshotRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(vehicle_id: u32, tick: u64) -> VehicleSnapshotRow {
        VehicleSnapshotRow {
            vehicle_id,
            tick,
            segment:  0,
            position: 4 + vehicle_id as i64 * 33,
            speed:    28,
            gap:      28,
        }
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            sim_time_secs:    tick,
            mean_speed:       28.5,
            stopped_vehicles: 0,
            occupied_cells:   150,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("vehicle_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("vehicle_snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["vehicle_id", "tick", "segment", "position", "speed", "gap"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers2,
            ["tick", "sim_time_secs", "mean_speed", "stopped_vehicles", "occupied_cells"]
        );
    }

    #[test]
    fn csv_snapshot_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = vec![snap_row(0, 5), snap_row(1, 5), snap_row(2, 5)];
        w.write_snapshots(&rows).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("vehicle_snapshots.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 3);
        assert_eq!(&read_rows[0][0], "0"); // vehicle_id
        assert_eq!(&read_rows[0][1], "5"); // tick
        assert_eq!(&read_rows[1][3], "37"); // position 4 + 33
        assert_eq!(&read_rows[2][0], "2");
    }

    #[test]
    fn csv_tick_summary_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 1);
        assert_eq!(&read_rows[0][0], "3");    // tick
        assert_eq!(&read_rows[0][2], "28.5"); // mean_speed
        assert_eq!(&read_rows[0][3], "0");    // stopped_vehicles
        assert_eq!(&read_rows[0][4], "150");  // occupied_cells
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap(); // should return Ok(())
    }

    #[test]
    fn integration_csv() {
        use rr_core::SimConfig;
        use rr_road::SegmentSpec;
        use rr_sim::SimBuilder;

        use crate::observer::SimOutputObserver;

        let mut config = SimConfig::with_seed(1);
        config.output_interval_ticks = 2;

        let mut sim = SimBuilder::new(config.clone())
            .segment(SegmentSpec::cars(3))
            .build()
            .unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &config);
        sim.run_with(6, &mut obs);
        assert!(obs.take_error().is_none(), "no write errors expected");

        // interval = 2 → snapshots fired at ticks 0, 2, 4 (3 ticks × 3 vehicles = 9 rows)
        let mut rdr = csv::Reader::from_path(dir.path().join("vehicle_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 9, "expected 3 ticks × 3 vehicles = 9 snapshot rows, got {}", rows.len());

        // one summary row per tick
        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let summaries: Vec<_> = rdr2.records().map(|r| r.unwrap()).collect();
        assert_eq!(summaries.len(), 6);
    }
}
